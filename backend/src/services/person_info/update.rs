use crate::domain::AssociationManager;
use crate::error::ApiError;
use crate::services::validation::{merge_person_details, person_from_payload};
use crate::services::AppState;
use crate::storage::Store;
use actix_web::{web, HttpResponse};
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::variant::ServiceVariant;
use common::model::EntityId;
use common::requests::PersonPayload;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<EntityId>,
    payload: web::Json<PersonPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    info!("Received request to update a Person: {}", id);
    let store = state.store()?;
    let updated = update_person(&*store, id, &payload.into_inner())?;
    Ok(HttpResponse::Ok().json(updated))
}

pub fn update_person<S>(store: &S, id: EntityId, payload: &PersonPayload) -> Result<Person, ApiError>
where
    S: Store<Person> + Store<Medication>,
{
    let details = person_from_payload(payload, ServiceVariant::PersonInfo)?;
    let mut person: Person = <S as Store<Person>>::find_by_id(store, id)?.ok_or(
        ApiError::Missing {
            kind: "Person",
            id,
        },
    )?;

    let manager = AssociationManager::new(store);
    if let Some(ids) = &payload.medication_ids {
        manager.set_medications(&mut person, ids)?;
    }
    merge_person_details(&mut person, details, payload);
    Ok(manager.save(&person)?)
}
