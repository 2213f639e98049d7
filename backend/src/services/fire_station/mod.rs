//! # FireStation service
//!
//! People are attached to a `FireStation`. The query endpoint reports who a
//! station number covers, with adult and child counts.
//!
//! ## Routes
//!
//! *   **`GET /firestation?stationNumber=...`**: `get::process`. Lists every
//!     person under any station with that number, with `adultCount` (older
//!     than 18) and `childCount` (everyone else). `404` when nobody is
//!     covered.
//! *   **`POST /firestation`**, **`PUT /firestation/{id}`**,
//!     **`DELETE /firestation/{id}`**: station CRUD. Deleting a station
//!     deletes the people it covers.
//! *   **`GET /person`**, **`POST /person`**, **`PUT /person/{id}`**,
//!     **`DELETE /person/{id}`**: person CRUD; the body's `fireStationId`
//!     picks the station.

mod get;

use crate::services::{parents, people};
use actix_web::web::{delete, get, post, put, resource, scope, ServiceConfig};
use common::model::fire_station::FireStation;

const API_PATH: &str = "/firestation";
const PERSON_PATH: &str = "/person";

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope(API_PATH)
            .service(
                resource("")
                    .route(get().to(get::process))
                    .route(post().to(parents::save::process::<FireStation>)),
            )
            .service(
                resource("/{id}")
                    .route(put().to(parents::update::process::<FireStation>))
                    .route(delete().to(parents::delete::process::<FireStation>)),
            ),
    )
    .service(people::crud_routes::<FireStation>(
        scope(PERSON_PATH),
        resource("").route(get().to(people::list::process)),
    ));
}
