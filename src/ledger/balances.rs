use super::transaction::{Transaction, TransactionKind};

/// Derived balance snapshot across both money pools.
///
/// Never stored; recomputed from the ledger on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balances {
    pub cash_balance: f64,
    pub card_balance: f64,
    pub grand_total: f64,
    pub total_income: f64,
}

impl Balances {
    /// Aggregates a transaction slice in a single pass.
    ///
    /// All four values are always computed; whether the card pool is shown
    /// is a display concern and does not change the arithmetic.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut cash_balance = 0.0;
        let mut card_balance = 0.0;
        let mut total_income = 0.0;
        for txn in transactions {
            if txn.kind == TransactionKind::Income {
                total_income += txn.amount;
            }
            let effect = txn.effect();
            if txn.is_card {
                card_balance += effect;
            } else {
                cash_balance += effect;
            }
        }
        Self {
            cash_balance,
            card_balance,
            grand_total: cash_balance + card_balance,
            total_income,
        }
    }
}
