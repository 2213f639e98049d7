use super::ParentResource;
use crate::domain::AssociationManager;
use crate::error::ApiError;
use crate::services::AppState;
use crate::storage::{SqliteStore, Store};
use actix_web::{web, HttpResponse};
use common::model::person::Person;
use common::model::EntityId;
use log::info;

/// Deletes parent `id` with `204 No Content`; `404` when it does not exist.
pub async fn process<P>(
    state: web::Data<AppState>,
    id: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError>
where
    P: ParentResource,
    SqliteStore: Store<P>,
{
    let id = id.into_inner();
    info!("Received request to delete {} {}", P::KIND, id);
    let store = state.store()?;
    store.atomically(|store| delete_parent::<P, _>(store, id))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Releases parent `id`'s people, then deletes it. Returns the people that
/// were released.
///
/// The handler runs this inside [`SqliteStore::atomically`], so a store
/// failure part-way leaves both the parent and its people in place.
pub fn delete_parent<P, S>(store: &S, id: EntityId) -> Result<Vec<Person>, ApiError>
where
    P: ParentResource,
    S: Store<P> + Store<Person>,
{
    let parent: P = <S as Store<P>>::find_by_id(store, id)?
        .ok_or(ApiError::Missing { kind: P::KIND, id })?;
    let released = AssociationManager::new(store).release_parent(&parent)?;
    <S as Store<P>>::delete(store, &parent)?;
    info!(
        "Deleted {} {} and released {} people",
        P::KIND,
        id,
        released.len()
    );
    Ok(released)
}
