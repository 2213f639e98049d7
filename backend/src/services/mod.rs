//! HTTP boundary for the four services.
//!
//! Each variant module registers its routes through `configure_routes`. The
//! shared handlers in `parents` and `people` are generic over the parent
//! kind, so the variants differ only in paths and in their query endpoint.
//!
//! Every handler takes the store lock once and holds it for the whole unit
//! of work (resolve, mutate, persist). A concurrent request can therefore
//! never see a half-applied edge.

pub mod child_alert;
pub mod community_email;
pub mod fire_station;
pub mod parents;
pub mod people;
pub mod person_info;
pub mod validation;

use crate::error::ApiError;
use crate::storage::SqliteStore;
use actix_web::web;
use common::model::variant::ServiceVariant;
use log::error;
use std::sync::{Mutex, MutexGuard};

/// Shared application state injected as `web::Data`.
pub struct AppState {
    store: Mutex<SqliteStore>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Enters the store's critical section for one request.
    pub fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, ApiError> {
        self.store.lock().map_err(|_| {
            error!("Store lock poisoned by an earlier panic");
            ApiError::StoreUnavailable
        })
    }
}

/// Registers the routes of `variant`.
pub fn configure(variant: ServiceVariant) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| match variant {
        ServiceVariant::ChildAlert => child_alert::configure_routes(cfg),
        ServiceVariant::CommunityEmail => community_email::configure_routes(cfg),
        ServiceVariant::FireStation => fire_station::configure_routes(cfg),
        ServiceVariant::PersonInfo => person_info::configure_routes(cfg),
    }
}
