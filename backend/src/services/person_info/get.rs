//! # Person info query
//!
//! Backs `GET /personinfo?firstName=...&lastName=...`.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: people are matched on the exact first and last name.
//! 2.  **Expansion**: each medication id they hold is loaded once and shared
//!     between the records that reference it.
//! 3.  **Response**: one `PersonInfoRecord` per match, with allergies and
//!     full medication details, or `404` when nobody has that name.

use crate::domain::AggregationProjector;
use crate::error::ApiError;
use crate::services::AppState;
use actix_web::{web, HttpResponse};
use common::requests::NameQuery;
use log::info;

/// Actix web handler for the `GET /personinfo` endpoint.
///
/// # Arguments
/// * `query` - The `firstName` and `lastName` query parameters.
///
/// # Returns
/// - `200 OK` with a JSON array of `PersonInfoRecord`s.
/// - `404 Not Found` when no person has that name.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<NameQuery>,
) -> Result<HttpResponse, ApiError> {
    info!(
        "Received request to find people: {} {}",
        query.first_name, query.last_name
    );
    let store = state.store()?;
    let records =
        AggregationProjector::new(&*store).person_info(&query.first_name, &query.last_name)?;
    Ok(HttpResponse::Ok().json(records))
}
