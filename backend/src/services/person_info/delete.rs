use crate::error::ApiError;
use crate::services::people::delete::delete_person;
use crate::services::AppState;
use actix_web::{web, HttpResponse};
use common::model::EntityId;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    id: web::Path<EntityId>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    info!("Received request to delete a Person: {}", id);
    let store = state.store()?;
    let removed = delete_person(&*store, id)?;
    info!("Deleted {} and released their medications", removed.full_name());
    Ok(HttpResponse::NoContent().finish())
}
