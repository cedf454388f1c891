use std::sync::Arc;

use crate::{
    errors::LedgerError,
    ledger::{Balances, MonthGroup, Transaction, TransactionId, TransactionKind},
    settings::{Settings, SettingsStore},
    storage::StorageBackend,
    store::LedgerStore,
};

/// Pending-delete confirmation state.
///
/// A delete request parks the target id here until the caller confirms or
/// cancels. At most one deletion is pending; a second request replaces the
/// pending id rather than queueing behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(TransactionId),
}

impl DeleteConfirmation {
    /// Parks `id` for confirmation. Last request wins.
    pub fn request(&mut self, id: TransactionId) {
        *self = DeleteConfirmation::Pending(id);
    }

    /// Resolves the pending request, handing back the id to delete.
    /// Confirming while idle yields nothing.
    pub fn confirm(&mut self) -> Option<TransactionId> {
        match std::mem::take(self) {
            DeleteConfirmation::Pending(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    /// Abandons the pending request without touching the ledger.
    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    pub fn pending(&self) -> Option<&TransactionId> {
        match self {
            DeleteConfirmation::Pending(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, DeleteConfirmation::Pending(_))
    }
}

/// Shared session state for a wallet front end.
///
/// Owns the ledger and settings stores plus the interactive delete flow, and
/// exposes the operation set a display layer drives. Mutations return the
/// data the caller needs to redraw; nothing here renders anything.
pub struct Session {
    ledger_store: LedgerStore,
    settings_store: SettingsStore,
    delete_confirmation: DeleteConfirmation,
}

impl Session {
    /// Loads both stores from `storage` and starts with no pending delete.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let settings_store = SettingsStore::load(storage.clone());
        let ledger_store = LedgerStore::load(storage);
        Self {
            ledger_store,
            settings_store,
            delete_confirmation: DeleteConfirmation::Idle,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger_store.ledger().transactions()
    }

    pub fn recent_transactions(&self, limit: usize) -> &[Transaction] {
        self.ledger_store.recent_transactions(limit)
    }

    pub fn transactions_by_month(&self) -> Vec<MonthGroup> {
        self.ledger_store.transactions_by_month()
    }

    pub fn balances(&self) -> Balances {
        self.ledger_store.balances()
    }

    pub fn settings(&self) -> &Settings {
        self.settings_store.settings()
    }

    pub fn delete_confirmation(&self) -> &DeleteConfirmation {
        &self.delete_confirmation
    }

    /// Records a new transaction. The card flag is honored only while card
    /// tracking is enabled.
    pub fn add_transaction(
        &mut self,
        amount: &str,
        kind: TransactionKind,
        description: &str,
        is_card: bool,
    ) -> Result<TransactionId, LedgerError> {
        self.ledger_store.add(
            amount,
            kind,
            description,
            is_card,
            self.settings_store.card_tracking_enabled(),
        )
    }

    /// Begins the delete flow for `id` without mutating the ledger.
    pub fn request_delete(&mut self, id: TransactionId) {
        self.delete_confirmation.request(id);
    }

    /// Executes the pending delete, if any, and returns the removed id.
    pub fn confirm_delete(&mut self) -> Option<TransactionId> {
        let id = self.delete_confirmation.confirm()?;
        self.ledger_store.remove(&id);
        Some(id)
    }

    /// Abandons the pending delete, leaving the ledger untouched.
    pub fn cancel_delete(&mut self) {
        self.delete_confirmation.cancel();
    }

    pub fn import_activity(&mut self, payload: &str) -> Result<usize, LedgerError> {
        self.ledger_store.import(payload)
    }

    pub fn export_activity(&self) -> Result<String, LedgerError> {
        self.ledger_store.export()
    }

    pub fn set_card_tracking_enabled(&mut self, enabled: bool) -> &Settings {
        self.settings_store.set_card_tracking_enabled(enabled)
    }

    pub fn set_display_name(&mut self, name: &str) -> &Settings {
        self.settings_store.set_display_name(name)
    }
}
