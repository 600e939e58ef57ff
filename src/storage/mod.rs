//! Key-value storage
//!
//! Backends that hold raw strings per key, and the JSON store wrapper the
//! catalog, session and preferences are built on.

pub mod backend;
pub mod filesystem;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod validation;

pub use backend::StorageBackend;
pub use filesystem::FileBackend;
pub use kv::KeyValueStore;
pub use memory::MemoryBackend;
