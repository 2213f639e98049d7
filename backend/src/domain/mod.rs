//! Association and projection rules shared by all four services.
//!
//! # Invariants
//! - A person's back-reference (`parent_id`) and medication set are the only
//!   stored form of an edge; a parent's people are always derived from them,
//!   so the two views cannot disagree.
//! - Every foreign key is resolved before any edge is touched. A failed
//!   resolution leaves the person exactly as it was.

use crate::storage::{Entity, PersonKey, StoreError};
use common::model::address::Address;
use common::model::city::City;
use common::model::fire_station::FireStation;
use common::model::medication::Medication;
use common::model::variant::ServiceVariant;
use common::model::EntityId;
use thiserror::Error;

pub mod association;
pub mod projection;

pub use association::{AssociationManager, Detached};
pub use projection::AggregationProjector;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced id does not resolve in storage.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: EntityId },
    /// A query key matched no people at all.
    #[error("no people found for {key}")]
    EmptyMatch { key: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How a parent holds its people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// One-to-many: each person belongs to at most one parent, and deleting
    /// the parent deletes its people.
    Exclusive,
    /// Many-to-many: people share the parent, and deleting it only removes
    /// the edges.
    Shared,
}

/// The "one" side of a person association.
pub trait Parent: Entity {
    const OWNERSHIP: Ownership;
    const VARIANT: ServiceVariant;

    /// Copies descriptive attributes from `details`, keeping this record's id.
    fn merge_details(&mut self, details: Self);

    /// Key selecting the people associated with parent `id`.
    fn people_key(id: EntityId) -> PersonKey {
        match Self::OWNERSHIP {
            Ownership::Exclusive => PersonKey::Parent(id),
            Ownership::Shared => PersonKey::Medication(id),
        }
    }
}

/// Parents that own their people through the `parent_id` back-reference.
pub trait Owner: Parent {}

impl Parent for Address {
    const OWNERSHIP: Ownership = Ownership::Exclusive;
    const VARIANT: ServiceVariant = ServiceVariant::ChildAlert;

    fn merge_details(&mut self, details: Self) {
        self.address = details.address;
    }
}

impl Owner for Address {}

impl Parent for City {
    const OWNERSHIP: Ownership = Ownership::Exclusive;
    const VARIANT: ServiceVariant = ServiceVariant::CommunityEmail;

    fn merge_details(&mut self, details: Self) {
        self.population = details.population;
        self.name = details.name;
        self.area_code = details.area_code;
    }
}

impl Owner for City {}

impl Parent for FireStation {
    const OWNERSHIP: Ownership = Ownership::Exclusive;
    const VARIANT: ServiceVariant = ServiceVariant::FireStation;

    fn merge_details(&mut self, details: Self) {
        self.station_number = details.station_number;
        self.address = details.address;
    }
}

impl Owner for FireStation {}

impl Parent for Medication {
    const OWNERSHIP: Ownership = Ownership::Shared;
    const VARIANT: ServiceVariant = ServiceVariant::PersonInfo;

    fn merge_details(&mut self, details: Self) {
        self.name = details.name;
        self.dosage = details.dosage;
    }
}
