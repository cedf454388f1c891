use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionId};

/// Ordered collection of transactions, most recent first.
///
/// The ledger is the sole writable copy of the list; consumers read through
/// borrows and mutate through [`crate::store::LedgerStore`]. Ordering is
/// re-established after every mutation rather than trusted from storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

/// Transactions bucketed under one month-and-year display label.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub label: String,
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an arbitrarily ordered list, establishing recency order.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut ledger = Self { transactions };
        ledger.sort_recent_first();
        ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.transactions.iter().any(|txn| &txn.id == id)
    }

    /// Prepends a transaction and restores recency order. Prepending before
    /// the stable sort keeps the newcomer ahead of same-instant entries.
    pub fn insert(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
        self.sort_recent_first();
    }

    /// Drops the transaction with `id`, reporting whether anything changed.
    pub fn remove(&mut self, id: &TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| &txn.id != id);
        self.transactions.len() != before
    }

    /// Folds imported entries in ahead of the existing ones.
    ///
    /// An existing entry whose id collides with an imported one is dropped
    /// so ids stay unique across the ledger; the imported entry wins.
    pub fn merge(&mut self, imported: Vec<Transaction>) {
        let incoming: HashSet<TransactionId> =
            imported.iter().map(|txn| txn.id.clone()).collect();
        let mut merged = imported;
        merged.extend(
            self.transactions
                .drain(..)
                .filter(|txn| !incoming.contains(&txn.id)),
        );
        self.transactions = merged;
        self.sort_recent_first();
    }

    /// The most recent `limit` entries.
    pub fn recent(&self, limit: usize) -> &[Transaction] {
        &self.transactions[..limit.min(self.transactions.len())]
    }

    /// Buckets the ledger by month, newest month first.
    ///
    /// Entries are already in recency order, so one month's transactions are
    /// contiguous and each group inherits that order.
    pub fn by_month(&self) -> Vec<MonthGroup> {
        let mut keyed: Vec<((i32, u32), MonthGroup)> = Vec::new();
        for txn in &self.transactions {
            let key = (txn.timestamp.year(), txn.timestamp.month());
            match keyed.last_mut() {
                Some((last, group)) if *last == key => group.transactions.push(txn.clone()),
                _ => keyed.push((
                    key,
                    MonthGroup {
                        label: month_label(&txn.timestamp),
                        transactions: vec![txn.clone()],
                    },
                )),
            }
        }
        keyed.into_iter().map(|(_, group)| group).collect()
    }

    fn sort_recent_first(&mut self) {
        // Stable, so equal timestamps keep their insertion order.
        self.transactions
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}

fn month_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %Y").to_string()
}
