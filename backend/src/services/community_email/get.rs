//! # Community email query
//!
//! Backs `GET /communityEmail?city=...`: contact details of every resident
//! of the cities with that name, with no age filter.

use crate::domain::AggregationProjector;
use crate::error::ApiError;
use crate::services::AppState;
use actix_web::{web, HttpResponse};
use common::requests::CityQuery;
use log::info;

/// Actix web handler for the `GET /communityEmail` endpoint.
///
/// # Arguments
/// * `query` - The `city` query parameter, matched against city names.
///
/// # Returns
/// - `200 OK` with a JSON array of `CommunityResident`s.
/// - `404 Not Found` when the city has no residents or does not exist.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<CityQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Received request to get people by city: {}", query.city);
    let store = state.store()?;
    let residents = AggregationProjector::new(&*store).community(&query.city)?;
    Ok(HttpResponse::Ok().json(residents))
}
