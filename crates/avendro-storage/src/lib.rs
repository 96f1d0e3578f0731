//! Avendro Storage Layer
//!
//! Local key-value persistence for the client session. The SQLite-backed
//! [`Database`] is the durable store; [`MemoryStore`] keeps everything in
//! process. Multi-key writes are all-or-nothing in both.

mod database;
mod error;
mod memory;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

pub type Result<T> = std::result::Result<T, StorageError>;
