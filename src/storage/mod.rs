pub mod json_backend;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over key-value persistence backends.
///
/// Mirrors the put/get surface the tracker consumes from browser-local
/// storage: each key holds one UTF-8 blob and a write replaces the previous
/// value wholesale.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

pub use json_backend::JsonFileStorage;
