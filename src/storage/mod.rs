//! Key-value persistence media the filesystem can be saved to.

mod file_store;
mod key_value;

pub use file_store::{FileStore, is_valid_key};
pub use key_value::{KeyValueStore, MemoryStore, StoreError};
