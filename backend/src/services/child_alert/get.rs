//! # Child alert query
//!
//! Backs `GET /childAlert?address=...`.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: every stored `Address` whose text equals the query is
//!     matched, and the people attached to each are loaded in id order.
//! 2.  **Projection**: `project_children` keeps only people under 18 and
//!     shapes them as `ChildRecord`s.
//! 3.  **Response**: no resident at all is a `404`; residents who are all
//!     adults give `200` with an empty `people` list.

use crate::domain::AggregationProjector;
use crate::error::ApiError;
use crate::services::AppState;
use actix_web::{web, HttpResponse};
use common::requests::AddressQuery;
use log::info;

/// Actix web handler for the `GET /childAlert` endpoint.
///
/// # Arguments
/// * `query` - The `address` query parameter, matched exactly.
///
/// # Returns
/// - `200 OK` with a `ChildAlert` JSON body.
/// - `404 Not Found` when nobody lives at a matching address.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<AddressQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Received request to get people by address: {}", query.address);
    let store = state.store()?;
    let alert = AggregationProjector::new(&*store).child_alert(&query.address)?;
    Ok(HttpResponse::Ok().json(alert))
}
