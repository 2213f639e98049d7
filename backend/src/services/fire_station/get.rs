//! # Fire station coverage query
//!
//! Backs `GET /firestation?stationNumber=...`. Several stations may share a
//! number; the people of all of them are reported together.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: stations with the number are matched and their people
//!     loaded, grouped by station id.
//! 2.  **Projection**: `project_station` lists everyone and counts people
//!     strictly older than 18 as adults. Everyone else, 18 included, is a
//!     child.
//! 3.  **Response**: `404` when no one is covered.

use crate::domain::AggregationProjector;
use crate::error::ApiError;
use crate::services::AppState;
use actix_web::{web, HttpResponse};
use common::requests::StationQuery;
use log::info;

/// Actix web handler for the `GET /firestation` endpoint.
///
/// # Arguments
/// * `query` - The `stationNumber` query parameter.
///
/// # Returns
/// - `200 OK` with a `StationCoverage` JSON body.
/// - `404 Not Found` when no one is covered by that number.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<StationQuery>,
) -> Result<HttpResponse, ApiError> {
    info!(
        "Received a request to get people by fire station {}",
        query.station_number
    );
    let store = state.store()?;
    let coverage = AggregationProjector::new(&*store).station_coverage(query.station_number)?;
    Ok(HttpResponse::Ok().json(coverage))
}
