use crate::domain::{AssociationManager, Owner};
use crate::error::ApiError;
use crate::services::validation::{parent_key, person_from_payload};
use crate::services::AppState;
use crate::storage::{SqliteStore, Store};
use actix_web::{web, HttpResponse};
use common::model::person::Person;
use common::requests::PersonPayload;
use log::info;

/// Creates a person under the parent named by the payload. Answers
/// `201 Created` with the stored person, or `400` when the parent is unknown.
pub async fn process<P>(
    state: web::Data<AppState>,
    payload: web::Json<PersonPayload>,
) -> Result<HttpResponse, ApiError>
where
    P: Owner,
    SqliteStore: Store<P>,
{
    let payload = payload.into_inner();
    info!(
        "Received request to add a new Person: {} {}",
        payload.first_name.as_deref().unwrap_or_default(),
        payload.last_name.as_deref().unwrap_or_default()
    );
    let store = state.store()?;
    let saved = create_person::<P, _>(&*store, &payload)?;
    Ok(HttpResponse::Created().json(saved))
}

/// Validates `payload`, attaches the new person to its parent and saves it.
///
/// An unknown parent id fails before anything is written.
pub fn create_person<P, S>(store: &S, payload: &PersonPayload) -> Result<Person, ApiError>
where
    P: Owner,
    S: Store<P> + Store<Person>,
{
    let mut person = person_from_payload(payload, P::VARIANT)?;
    let parent_id = parent_key(payload, P::VARIANT)?;
    let manager = AssociationManager::new(store);
    manager.attach::<P>(&mut person, parent_id)?;
    Ok(manager.save(&person)?)
}
