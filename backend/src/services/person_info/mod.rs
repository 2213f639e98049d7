//! # PersonInfo service
//!
//! People hold any number of `Medication`s and a medication is shared by any
//! number of people. The query endpoint looks people up by full name.
//!
//! ## Routes
//!
//! *   **`GET /personinfo?firstName=...&lastName=...`**: `get::process`.
//!     Every person with that name, with allergies and resolved medications.
//!     `404` when no one matches.
//! *   **`POST /personinfo`**: `save::process`. `medicationIds` lists the
//!     medications to link; an unknown id rejects the request.
//! *   **`PUT /personinfo/{id}`**: `update::process`. Replaces the whole
//!     medication set when `medicationIds` is present and keeps it when the
//!     field is absent.
//! *   **`DELETE /personinfo/{id}`**: `delete::process`. Medications are kept.
//! *   **`GET /medication`**: every medication with the people holding it;
//!     `404` when there are none.
//! *   **`POST /medication`**, **`PUT /medication/{id}`**,
//!     **`DELETE /medication/{id}`**: medication CRUD. Deleting a medication
//!     only removes it from its holders.

mod delete;
mod get;
mod save;
mod update;

pub use save::create_person;
pub use update::update_person;

use crate::services::parents;
use actix_web::web::{delete, get, post, put, resource, scope, ServiceConfig};
use common::model::medication::Medication;

const API_PATH: &str = "/personinfo";
const MEDICATION_PATH: &str = "/medication";

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope(API_PATH)
            .service(
                resource("")
                    .route(get().to(get::process))
                    .route(post().to(save::process)),
            )
            .service(
                resource("/{id}")
                    .route(put().to(update::process))
                    .route(delete().to(delete::process)),
            ),
    )
    .service(
        scope(MEDICATION_PATH)
            .service(
                resource("")
                    .route(get().to(parents::list::process::<Medication>))
                    .route(post().to(parents::save::process::<Medication>)),
            )
            .service(
                resource("/{id}")
                    .route(put().to(parents::update::process::<Medication>))
                    .route(delete().to(parents::delete::process::<Medication>)),
            ),
    );
}
