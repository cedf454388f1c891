use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    errors::LedgerError,
    ledger::{
        Balances, Ledger, MonthGroup, Transaction, TransactionId, TransactionKind,
        TransactionRecord,
    },
    storage::StorageBackend,
};

/// Storage key holding the persisted transaction sequence.
pub const TRANSACTIONS_KEY: &str = "cashTrackerTransactions";

/// Conventional number of entries a front end shows on its main screen.
pub const RECENT_DISPLAY_LIMIT: usize = 4;

/// Conventional file name for exported activity payloads.
pub const ACTIVITY_FILE_NAME: &str = "wallet_activity.txt";

/// Facade that owns the canonical ledger and coordinates persistence.
///
/// Every mutating operation persists before returning. Persistence failures
/// are logged and swallowed so the in-memory ledger stays authoritative;
/// only validation and import-format problems surface as errors.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Arc<dyn StorageBackend>,
}

impl LedgerStore {
    /// Opens the store over `storage`, loading whatever ledger it holds.
    ///
    /// A missing record yields an empty ledger; so does malformed data or a
    /// backend read failure, after a warning. Loading never raises.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let ledger = match read_ledger(storage.as_ref()) {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!("failed to load persisted transactions: {err}");
                Ledger::new()
            }
        };
        debug!(transactions = ledger.len(), "ledger loaded");
        Self { ledger, storage }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balances(&self) -> Balances {
        Balances::compute(self.ledger.transactions())
    }

    pub fn recent_transactions(&self, limit: usize) -> &[Transaction] {
        self.ledger.recent(limit)
    }

    pub fn transactions_by_month(&self) -> Vec<MonthGroup> {
        self.ledger.by_month()
    }

    /// Validates and records a new transaction, returning its id.
    ///
    /// `amount` is raw caller input and must parse to a finite positive
    /// decimal; otherwise the operation is rejected and neither the ledger
    /// nor the persisted record changes. The card flag is forced off unless
    /// `card_tracking_enabled`.
    pub fn add(
        &mut self,
        amount: &str,
        kind: TransactionKind,
        description: &str,
        is_card: bool,
        card_tracking_enabled: bool,
    ) -> Result<TransactionId, LedgerError> {
        let trimmed = amount.trim();
        let parsed = trimmed
            .parse::<f64>()
            .map_err(|_| LedgerError::InvalidAmount(trimmed.to_string()))?;
        if !parsed.is_finite() || parsed <= 0.0 {
            return Err(LedgerError::InvalidAmount(trimmed.to_string()));
        }
        let transaction = Transaction::new(
            parsed,
            kind,
            description,
            if card_tracking_enabled { is_card } else { false },
        );
        let id = transaction.id.clone();
        self.ledger.insert(transaction);
        self.persist();
        debug!(id = %id, "transaction recorded");
        Ok(id)
    }

    /// Removes the transaction with `id` and re-persists. An absent id is a
    /// no-op, not an error, so removal is idempotent.
    pub fn remove(&mut self, id: &TransactionId) {
        if self.ledger.remove(id) {
            self.persist();
            debug!(id = %id, "transaction removed");
        }
    }

    /// Merges entries parsed from an exported activity payload.
    ///
    /// The payload must be a JSON array of candidate records; anything else
    /// rejects the whole import and leaves the ledger untouched. Imported
    /// entries sort in ahead of existing ones and win id collisions.
    /// Returns how many entries were merged in.
    pub fn import(&mut self, payload: &str) -> Result<usize, LedgerError> {
        let parsed: Value = serde_json::from_str(payload)
            .map_err(|err| LedgerError::InvalidImport(err.to_string()))?;
        let Value::Array(entries) = parsed else {
            return Err(LedgerError::InvalidImport(
                "expected a sequence of transactions".into(),
            ));
        };
        let records: Vec<TransactionRecord> = entries
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(|err| LedgerError::InvalidImport(err.to_string()))?;
        let imported: Vec<Transaction> =
            records.into_iter().map(TransactionRecord::coerce).collect();
        let count = imported.len();
        self.ledger.merge(imported);
        self.persist();
        debug!(count, "activity imported");
        Ok(count)
    }

    /// Serializes the ledger for download as an activity file.
    pub fn export(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(&self.ledger)?)
    }

    /// Persists the current ledger, logging instead of raising on failure.
    pub fn save(&self) {
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.ledger) {
            Ok(payload) => {
                if let Err(err) = self.storage.put(TRANSACTIONS_KEY, &payload) {
                    warn!("failed to persist transactions: {err}");
                }
            }
            Err(err) => warn!("failed to serialize transactions: {err}"),
        }
    }
}

fn read_ledger(storage: &dyn StorageBackend) -> Result<Ledger, LedgerError> {
    let Some(raw) = storage.get(TRANSACTIONS_KEY)? else {
        return Ok(Ledger::new());
    };
    let records: Vec<TransactionRecord> = serde_json::from_str(&raw)?;
    Ok(Ledger::from_transactions(
        records.into_iter().map(TransactionRecord::coerce).collect(),
    ))
}
