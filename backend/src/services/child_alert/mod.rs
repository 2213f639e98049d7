//! # ChildAlert service
//!
//! People are attached to an `Address`. The query endpoint lists the
//! children (under 18) living at an address.
//!
//! ## Routes
//!
//! *   **`GET /childAlert?address=...`**: `get::process`. Returns
//!     `{ "people": [...] }` with the children at every address whose text
//!     matches. `404` when nobody lives there; `200` with an empty list when
//!     only adults do.
//! *   **`POST /childAlert`**, **`PUT /childAlert/{id}`**,
//!     **`DELETE /childAlert/{id}`**: address CRUD. Deleting an address
//!     deletes the people living at it.
//! *   **`GET /person`**, **`POST /person`**, **`PUT /person/{id}`**,
//!     **`DELETE /person/{id}`**: person CRUD; the body's `addressId` picks
//!     the address.

mod get;

use crate::services::{parents, people};
use actix_web::web::{delete, get, post, put, resource, scope, ServiceConfig};
use common::model::address::Address;

const API_PATH: &str = "/childAlert";
const PERSON_PATH: &str = "/person";

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope(API_PATH)
            .service(
                resource("")
                    .route(get().to(get::process))
                    .route(post().to(parents::save::process::<Address>)),
            )
            .service(
                resource("/{id}")
                    .route(put().to(parents::update::process::<Address>))
                    .route(delete().to(parents::delete::process::<Address>)),
            ),
    )
    .service(people::crud_routes::<Address>(
        scope(PERSON_PATH),
        resource("").route(get().to(people::list::process)),
    ));
}
