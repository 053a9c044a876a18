//! Durable string-keyed storage for the cart
//!
//! The cart is mirrored to a single slot after every mutation. The
//! [`CartStorage`] trait is the seam between cart logic and wherever the slot
//! actually lives, so the cart can be tested without touching the disk.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying file failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backend cannot be used at all (no home directory, quota, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed slot store
///
/// Values are whole documents; `save` replaces the previous value for the key.
pub trait CartStorage {
    /// Returns the stored value, or `None` if nothing was ever saved under `key`
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
