use crate::domain::AssociationManager;
use crate::error::ApiError;
use crate::services::validation::person_from_payload;
use crate::services::AppState;
use crate::storage::Store;
use actix_web::{web, HttpResponse};
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::variant::ServiceVariant;
use common::requests::PersonPayload;
use log::info;

/// Creates a person with the listed medications; `201 Created` on success.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<PersonPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    info!(
        "Received request to add a new Person: {} {}",
        payload.first_name.as_deref().unwrap_or_default(),
        payload.last_name.as_deref().unwrap_or_default()
    );
    let store = state.store()?;
    let saved = create_person(&*store, &payload)?;
    Ok(HttpResponse::Created().json(saved))
}

/// Validates `payload`, links the listed medications and saves the person.
pub fn create_person<S>(store: &S, payload: &PersonPayload) -> Result<Person, ApiError>
where
    S: Store<Person> + Store<Medication>,
{
    let mut person = person_from_payload(payload, ServiceVariant::PersonInfo)?;
    let manager = AssociationManager::new(store);
    if let Some(ids) = &payload.medication_ids {
        manager.set_medications(&mut person, ids)?;
    }
    Ok(manager.save(&person)?)
}
