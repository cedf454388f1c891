use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Opaque, ledger-unique transaction identifier.
///
/// New ids are generated from UUIDs; ids carried in imported or legacy data
/// are kept verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TransactionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for TransactionId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Direction of a transaction's effect on a balance pool.
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// A single recorded financial event.
///
/// The wire form matches the persisted record layout: `kind` serializes as
/// `type`, the pool flag as `isCashApp`, timestamps as RFC 3339 text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    #[serde(rename = "isCashApp")]
    pub is_card: bool,
}

impl Transaction {
    /// Builds a transaction stamped with a fresh id and the current instant.
    /// The description is stored trimmed.
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        description: impl Into<String>,
        is_card: bool,
    ) -> Self {
        let description = description.into();
        Self {
            id: TransactionId::generate(),
            timestamp: Utc::now(),
            amount,
            kind,
            description: description.trim().to_string(),
            is_card,
        }
    }

    /// Signed contribution of this transaction to its pool balance.
    pub fn effect(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Loosely typed wire record accepted at the load boundary.
///
/// Persisted data may predate the current build or come from hand-edited
/// export files, so amounts, flags, and timestamps are coerced rather than
/// trusted. Top-level shape violations still fail the parse; field-level
/// damage degrades per field.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: Value,
    #[serde(default)]
    pub amount: Value,
    #[serde(rename = "type", default)]
    pub kind: Value,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "isCashApp", default)]
    pub is_cash_app: Value,
}

impl TransactionRecord {
    /// Folds the record into the strict domain shape.
    ///
    /// Coercions: missing or non-numeric amounts become 0, only a literal
    /// `true` enables the card flag, unparseable timestamps fall back to the
    /// Unix epoch, and unknown kinds count as expenses. A record without an
    /// id receives a fresh one so ledger-wide id uniqueness holds.
    pub fn coerce(self) -> Transaction {
        let amount = match &self.amount {
            Value::Number(number) => number.as_f64().unwrap_or(0.0),
            Value::String(raw) => raw.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        let kind = match self.kind.as_str() {
            Some("income") => TransactionKind::Income,
            _ => TransactionKind::Expense,
        };
        let timestamp = self
            .timestamp
            .as_str()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let id = if self.id.is_empty() {
            TransactionId::generate()
        } else {
            TransactionId::from(self.id)
        };
        Transaction {
            id,
            timestamp,
            amount: if amount.is_finite() { amount } else { 0.0 },
            kind,
            description: self.description,
            is_card: self.is_cash_app == Value::Bool(true),
        }
    }
}
