pub mod connection;
pub mod entities;
pub mod keys;
pub mod repositories;
pub mod store;

pub use store::{KeyValueStore, MemoryStore, RankedMember, SqlStore, VersionedValue};
