use crate::error::ApiError;
use crate::services::AppState;
use crate::storage::{SqliteStore, Store};
use actix_web::{web, HttpResponse};
use common::model::person::Person;
use log::info;

pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    info!("Received request to get all people");
    let store = state.store()?;
    let people = <SqliteStore as Store<Person>>::find_all(&*store)?;
    Ok(HttpResponse::Ok().json(people))
}
