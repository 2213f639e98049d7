//! Storage collaborator contract and its implementations.
//!
//! The domain layer talks to persistence only through [`Store`]: find by id,
//! find by key, save, delete and find all. Nothing above this module issues
//! SQL.

use common::model::address::Address;
use common::model::city::City;
use common::model::fire_station::FireStation;
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::EntityId;
use std::fmt::Debug;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid persisted {kind} data: {message}")]
    InvalidData { kind: &'static str, message: String },
}

/// A stored record kind with a storage-assigned id and a lookup key.
pub trait Entity: Clone {
    /// What `find_by_key` matches on for this kind.
    type Key: Debug;

    /// Human-readable kind name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> Option<EntityId>;
    fn set_id(&mut self, id: EntityId);
    fn clear_id(&mut self);
    fn matches(&self, key: &Self::Key) -> bool;
}

/// Generic persistence operations over one entity kind.
///
/// `save` inserts when the entity has no id and updates otherwise; it returns
/// the entity as stored, with its id assigned. `delete` of an entity that is
/// not stored is a no-op.
pub trait Store<E: Entity> {
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<E>>;
    fn find_by_key(&self, key: &E::Key) -> StoreResult<Vec<E>>;
    fn save(&self, entity: &E) -> StoreResult<E>;
    fn delete(&self, entity: &E) -> StoreResult<()>;
    fn find_all(&self) -> StoreResult<Vec<E>>;
}

/// Ways to select people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonKey {
    /// People whose one-to-many back-reference is this parent.
    Parent(EntityId),
    /// People holding this medication.
    Medication(EntityId),
    Name {
        first_name: String,
        last_name: String,
    },
}

impl Entity for Person {
    type Key = PersonKey;
    const KIND: &'static str = "Person";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn matches(&self, key: &PersonKey) -> bool {
        match key {
            PersonKey::Parent(id) => self.parent_id == Some(*id),
            PersonKey::Medication(id) => self.medication_ids.contains(id),
            PersonKey::Name {
                first_name,
                last_name,
            } => self.first_name == *first_name && self.last_name == *last_name,
        }
    }
}

impl Entity for Address {
    type Key = String;
    const KIND: &'static str = "Address";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn matches(&self, key: &String) -> bool {
        self.address == *key
    }
}

impl Entity for City {
    type Key = String;
    const KIND: &'static str = "City";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn matches(&self, key: &String) -> bool {
        self.name == *key
    }
}

impl Entity for FireStation {
    /// Station number.
    type Key = i32;
    const KIND: &'static str = "FireStation";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn matches(&self, key: &i32) -> bool {
        self.station_number == *key
    }
}

impl Entity for Medication {
    type Key = String;
    const KIND: &'static str = "Medication";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn matches(&self, key: &String) -> bool {
        self.name == *key
    }
}
