use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::predict::PredictError;

pub enum ApiError {
    Validation(String),
    NotFound(&'static str),
    Unavailable(&'static str),
    Catalog(CatalogError),
    Predict(PredictError),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::EmptyQuery => ApiError::Validation(e.to_string()),
            _ => ApiError::Catalog(e),
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        ApiError::Predict(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what.to_string()),
            ApiError::Unavailable(reason) => (StatusCode::BAD_REQUEST, reason.to_string()),
            ApiError::Catalog(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Predict(e) => {
                log::warn!("Position lookup failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(ErrorResponse::new(&message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of every failed API call.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            success: false,
            error: error.to_string(),
        }
    }
}
