use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tempfile::TempDir;
use wallet_core::storage::JsonFileStorage;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated storage backend over a unique directory for each test.
pub fn setup_storage() -> Arc<JsonFileStorage> {
    let temp = TempDir::new().expect("create temp dir");
    let storage = JsonFileStorage::new(temp.path()).expect("create json storage backend");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    Arc::new(storage)
}
