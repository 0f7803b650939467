#![forbid(unsafe_code)]

pub mod repository;
pub mod snapshot;
pub mod sqlite;

pub use repository::{InMemoryRepository, StateRepository, Storage, StorageError};
pub use snapshot::{DEFAULT_STATE_KEY, SNAPSHOT_VERSION, decode_state, encode_state};
