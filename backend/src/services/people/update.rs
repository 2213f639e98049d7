use crate::domain::{AssociationManager, Owner};
use crate::error::ApiError;
use crate::services::validation::{merge_person_details, parent_key, person_from_payload};
use crate::services::AppState;
use crate::storage::{SqliteStore, Store};
use actix_web::{web, HttpResponse};
use common::model::person::Person;
use common::model::EntityId;
use common::requests::PersonPayload;
use log::info;

/// Updates person `id` and moves it to the payload's parent. Answers `404`
/// for an unknown person and `400` for an unknown parent.
pub async fn process<P>(
    state: web::Data<AppState>,
    id: web::Path<EntityId>,
    payload: web::Json<PersonPayload>,
) -> Result<HttpResponse, ApiError>
where
    P: Owner,
    SqliteStore: Store<P>,
{
    let id = id.into_inner();
    info!("Received request to update Person: {}", id);
    let store = state.store()?;
    let updated = update_person::<P, _>(&*store, id, &payload.into_inner())?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Copies the payload's fields onto person `id` and moves it to the
/// payload's parent.
pub fn update_person<P, S>(
    store: &S,
    id: EntityId,
    payload: &PersonPayload,
) -> Result<Person, ApiError>
where
    P: Owner,
    S: Store<P> + Store<Person>,
{
    let details = person_from_payload(payload, P::VARIANT)?;
    let parent_id = parent_key(payload, P::VARIANT)?;
    let mut person: Person = <S as Store<Person>>::find_by_id(store, id)?.ok_or(
        ApiError::Missing {
            kind: "Person",
            id,
        },
    )?;

    let manager = AssociationManager::new(store);
    manager.reattach::<P>(&mut person, parent_id)?;
    merge_person_details(&mut person, details, payload);
    Ok(manager.save(&person)?)
}
