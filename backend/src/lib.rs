//! SafetyNet services: CRUD over a parent/person model plus one query
//! endpoint per variant.
//!
//! - `domain`: association consistency and response projections.
//! - `storage`: the store contract, SQLite and in-memory implementations.
//! - `services`: actix-web handlers and route registration.

pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;

pub use crate::config::{DatabaseLocation, ServerConfig};
pub use domain::{AggregationProjector, AssociationManager, CoreError, CoreResult};
pub use error::ApiError;
pub use services::AppState;
pub use storage::{MemoryStore, SqliteStore, Store, StoreError};

/// Opens the store described by `location`.
pub fn open_store(location: &DatabaseLocation) -> Result<SqliteStore, StoreError> {
    match location {
        DatabaseLocation::InMemory => SqliteStore::open_in_memory(),
        DatabaseLocation::File(path) => SqliteStore::open(path),
    }
}
