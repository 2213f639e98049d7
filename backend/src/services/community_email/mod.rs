//! # CommunityEmail service
//!
//! People are attached to a `City`; the query endpoint lists a city's
//! residents with their contact details.
//!
//! ## Routes
//!
//! *   **`GET /communityEmail?city=...`**: `get::process`. `404` when the
//!     city has no residents.
//! *   **`POST /communityEmail`**, **`PUT /communityEmail/{id}`**,
//!     **`DELETE /communityEmail/{id}`**: person CRUD; the body's `cityId`
//!     picks the city.
//! *   **`GET /city`**: every city with its residents; `404` when there are
//!     no cities.
//! *   **`POST /city`**, **`PUT /city/{id}`**, **`DELETE /city/{id}`**: city
//!     CRUD. Deleting a city deletes its residents.

mod get;

use crate::services::{parents, people};
use actix_web::web::{delete, get, post, put, resource, scope, ServiceConfig};
use common::model::city::City;

const API_PATH: &str = "/communityEmail";
const CITY_PATH: &str = "/city";

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(people::crud_routes::<City>(
        scope(API_PATH),
        resource("").route(get().to(get::process)),
    ))
    .service(
        scope(CITY_PATH)
            .service(
                resource("")
                    .route(get().to(parents::list::process::<City>))
                    .route(post().to(parents::save::process::<City>)),
            )
            .service(
                resource("/{id}")
                    .route(put().to(parents::update::process::<City>))
                    .route(delete().to(parents::delete::process::<City>)),
            ),
    );
}
