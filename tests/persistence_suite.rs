mod common;

use std::sync::Arc;

use common::setup_storage;
use wallet_core::{
    errors::LedgerError,
    ledger::TransactionKind,
    storage::{JsonFileStorage, StorageBackend},
    store::{LedgerStore, TRANSACTIONS_KEY},
};

/// Backend that serves reads but fails every write, simulating a full or
/// revoked storage quota.
struct ReadOnlyStorage {
    inner: Arc<JsonFileStorage>,
}

impl StorageBackend for ReadOnlyStorage {
    fn get(&self, key: &str) -> wallet_core::storage::Result<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, _key: &str, _value: &str) -> wallet_core::storage::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "storage quota exceeded",
        )
        .into())
    }
}

#[test]
fn save_then_load_reproduces_the_ledger() {
    let storage = setup_storage();
    let mut store = LedgerStore::load(storage.clone());
    store
        .add("50", TransactionKind::Income, "paycheck", false, true)
        .expect("add income");
    store
        .add("19.99", TransactionKind::Expense, "dinner", true, true)
        .expect("add card expense");

    let reloaded = LedgerStore::load(storage);
    let original = store.ledger().transactions();
    let restored = reloaded.ledger().transactions();
    assert_eq!(restored.len(), original.len());
    for (a, b) in original.iter().zip(restored) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.amount, b.amount);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.description, b.description);
        assert_eq!(a.is_card, b.is_card);
        assert_eq!(a.timestamp.timestamp_millis(), b.timestamp.timestamp_millis());
    }
}

#[test]
fn legacy_records_are_coerced_on_load() {
    let storage = setup_storage();
    storage
        .put(
            TRANSACTIONS_KEY,
            r#"[
                {"id":"1716734964123","timestamp":"2024-05-26T15:29:24.123Z","amount":"12.5","type":"income","description":"transfer","isCashApp":"true"},
                {"id":"1716734964124","timestamp":"last tuesday","amount":null,"type":"groceries","description":""},
                {"timestamp":"2024-06-01T08:00:00Z","amount":3,"type":"expense","description":"bus","isCashApp":true}
            ]"#,
        )
        .expect("seed legacy payload");

    let store = LedgerStore::load(storage);
    let transactions = store.ledger().transactions();
    assert_eq!(transactions.len(), 3);

    // Most recent first; the epoch-defaulted bad timestamp sorts last.
    assert_eq!(transactions[0].description, "bus");
    assert!(transactions[0].is_card);
    assert_eq!(transactions[1].id.as_str(), "1716734964123");
    assert_eq!(transactions[1].amount, 12.5);
    assert_eq!(transactions[1].kind, TransactionKind::Income);
    assert!(!transactions[1].is_card, "string flag must not count as true");
    assert_eq!(transactions[2].amount, 0.0);
    assert_eq!(transactions[2].kind, TransactionKind::Expense);
    assert_eq!(transactions[2].timestamp.timestamp(), 0);
}

#[test]
fn corrupt_persisted_data_yields_an_empty_ledger() {
    for payload in ["not valid json", r#"{"transactions":[]}"#, "42"] {
        let storage = setup_storage();
        storage
            .put(TRANSACTIONS_KEY, payload)
            .expect("seed corrupt payload");
        let store = LedgerStore::load(storage);
        assert!(store.ledger().is_empty(), "payload: {payload}");
    }
}

#[test]
fn persisted_wire_form_matches_the_record_layout() {
    let storage = setup_storage();
    let mut store = LedgerStore::load(storage.clone());
    store
        .add("7.25", TransactionKind::Expense, "coffee", false, false)
        .expect("add");

    let raw = storage
        .get(TRANSACTIONS_KEY)
        .expect("read record")
        .expect("record exists");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let entries = parsed.as_array().expect("array of records");
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry["type"], "expense");
    assert_eq!(entry["isCashApp"], false);
    assert_eq!(entry["amount"], 7.25);
    assert!(entry["id"].is_string());
    assert!(entry["timestamp"].is_string());
}

#[test]
fn failed_persistence_keeps_the_in_memory_ledger_authoritative() {
    let seed = setup_storage();
    {
        let mut store = LedgerStore::load(seed.clone());
        store
            .add("10", TransactionKind::Income, "seed", false, false)
            .expect("seed entry");
    }
    let before = seed
        .get(TRANSACTIONS_KEY)
        .expect("read")
        .expect("seeded record");

    let mut store = LedgerStore::load(Arc::new(ReadOnlyStorage { inner: seed.clone() }));
    store
        .add("25", TransactionKind::Income, "unsaved", false, false)
        .expect("add succeeds even when persistence fails");
    assert_eq!(store.ledger().len(), 2);

    let after = seed
        .get(TRANSACTIONS_KEY)
        .expect("read")
        .expect("record still present");
    assert_eq!(after, before, "failed write must not alter the record");
}

#[test]
fn validation_failure_leaves_persisted_bytes_unchanged() {
    let storage = setup_storage();
    let mut store = LedgerStore::load(storage.clone());
    store
        .add("10", TransactionKind::Income, "seed", false, false)
        .expect("seed entry");
    let before = storage
        .get(TRANSACTIONS_KEY)
        .expect("read")
        .expect("seeded record");

    let err = store
        .add("-1", TransactionKind::Expense, "bad", false, false)
        .expect_err("negative amounts are rejected");
    assert!(matches!(err, LedgerError::InvalidAmount(_)));

    let after = storage
        .get(TRANSACTIONS_KEY)
        .expect("read")
        .expect("record still present");
    assert_eq!(after, before);
    assert_eq!(store.ledger().len(), 1);
}
