use crate::domain::AssociationManager;
use crate::error::ApiError;
use crate::services::AppState;
use crate::storage::Store;
use actix_web::{web, HttpResponse};
use common::model::person::Person;
use common::model::EntityId;
use log::info;

/// Answers `204 No Content`, or `404` when the person does not exist.
pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    info!("Received request to delete Person: {}", id);
    let store = state.store()?;
    delete_person(&*store, id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Detaches person `id` from every parent and medication, then deletes it.
/// Parents are never deleted here.
pub fn delete_person<S>(store: &S, id: EntityId) -> Result<Person, ApiError>
where
    S: Store<Person>,
{
    let mut person = store.find_by_id(id)?.ok_or(ApiError::Missing {
        kind: "Person",
        id,
    })?;
    AssociationManager::new(store).detach(&mut person);
    store.delete(&person)?;
    Ok(person)
}
