use super::ParentResource;
use crate::error::ApiError;
use crate::services::AppState;
use crate::storage::{SqliteStore, Store};
use actix_web::{web, HttpResponse};
use log::info;

pub async fn process<P>(
    state: web::Data<AppState>,
    payload: web::Json<P>,
) -> Result<HttpResponse, ApiError>
where
    P: ParentResource,
    SqliteStore: Store<P>,
{
    info!("Received request to add a new {}", P::KIND);
    let store = state.store()?;
    let saved = save_parent(&*store, payload.into_inner())?;
    Ok(HttpResponse::Created().json(saved))
}

pub fn save_parent<P, S>(store: &S, mut parent: P) -> Result<P, ApiError>
where
    P: ParentResource,
    S: Store<P>,
{
    parent.validate()?;
    parent.clear_id();
    Ok(store.save(&parent)?)
}
