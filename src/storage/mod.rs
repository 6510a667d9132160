//! Key-value storage areas backing the client session.
//!
//! Two areas exist: a durable one that survives restarts ([`FileStore`]) and a
//! session-scoped one that lives as long as the process ([`MemoryStore`]).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key names as constants.
pub mod keys {
    /// Bearer token (durable or session area, never both)
    pub const TOKEN: &str = "token";
    /// Cached email of the signed-in user (durable area)
    pub const USER_EMAIL: &str = "userEmail";
}

/// A string key-value persistence area.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage file: {0}")]
    Corrupt(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<StorageError> for crate::error::ClientError {
    fn from(err: StorageError) -> Self {
        crate::error::ClientError::Storage(err.to_string())
    }
}
