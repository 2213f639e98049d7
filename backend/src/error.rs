use crate::domain::CoreError;
use crate::storage::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::EntityId;
use log::{error, warn};
use thiserror::Error;

/// Everything a request handler can fail with, mapped to an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed a required-field or range check.
    #[error("{0}")]
    Validation(String),

    /// The id in the request path does not exist.
    #[error("{kind} not found: {id}")]
    Missing { kind: &'static str, id: EntityId },

    /// A listing endpoint found no records of a kind at all.
    #[error("no {0} records found")]
    Empty(&'static str),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("storage is unavailable")]
    StoreUnavailable,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Missing { .. } | ApiError::Empty(_) => StatusCode::NOT_FOUND,
            // An unresolved foreign key in a payload is bad client input.
            ApiError::Core(CoreError::NotFound { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::EmptyMatch { .. }) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::Store(_)) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        HttpResponse::build(status).body(self.to_string())
    }
}
