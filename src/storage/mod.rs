pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Durable string-valued key-value storage.
///
/// Values are replaced whole on every write; there are no partial updates.
pub trait KeyValueStore {
    /// Human-readable store name for log lines.
    fn name(&self) -> &str;

    /// Read the raw value for `key`. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
