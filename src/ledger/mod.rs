//! Ledger domain models, persistence-friendly types, and helpers.

pub mod balances;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use balances::Balances;
pub use ledger::{Ledger, MonthGroup};
pub use transaction::{Transaction, TransactionId, TransactionKind, TransactionRecord};
