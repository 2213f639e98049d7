//! Person handlers for the one-to-many variants (Address, City,
//! FireStation).
//!
//! The payload's `parentId` (or `addressId`, `cityId`, `fireStationId`)
//! names the parent the person is attached to on create and moved to on
//! update.

pub mod delete;
pub mod list;
pub mod save;
pub mod update;

use crate::domain::Owner;
use crate::storage::{SqliteStore, Store};
use actix_web::web::{delete, post, put, resource};
use actix_web::{Resource, Scope};
use common::model::person::Person;

/// Adds person create, update and delete routes to `scope`. `collection`
/// is the variant's resource at `""`, which gets the create route next to
/// whatever GET handler the variant serves there.
pub fn crud_routes<P>(scope: Scope, collection: Resource) -> Scope
where
    P: Owner + 'static,
    SqliteStore: Store<P> + Store<Person>,
{
    scope
        .service(collection.route(post().to(save::process::<P>)))
        .service(
            resource("/{id}")
                .route(put().to(update::process::<P>))
                .route(delete().to(delete::process)),
        )
}
