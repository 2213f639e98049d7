use super::ParentResource;
use crate::error::ApiError;
use crate::services::AppState;
use crate::storage::{SqliteStore, Store};
use actix_web::{web, HttpResponse};
use common::model::EntityId;
use log::info;

pub async fn process<P>(
    state: web::Data<AppState>,
    id: web::Path<EntityId>,
    payload: web::Json<P>,
) -> Result<HttpResponse, ApiError>
where
    P: ParentResource,
    SqliteStore: Store<P>,
{
    let id = id.into_inner();
    info!("Received request to update {} {}", P::KIND, id);
    let store = state.store()?;
    let updated = update_parent(&*store, id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Copies `details` onto parent `id`; its people are unaffected.
pub fn update_parent<P, S>(store: &S, id: EntityId, details: P) -> Result<P, ApiError>
where
    P: ParentResource,
    S: Store<P>,
{
    details.validate()?;
    let mut parent = store
        .find_by_id(id)?
        .ok_or(ApiError::Missing { kind: P::KIND, id })?;
    parent.merge_details(details);
    Ok(store.save(&parent)?)
}
