use crate::models::MovieId;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid page parameter")]
    InvalidPage(String),

    #[error("Invalid movie ID parameter")]
    InvalidMovieId(String),

    #[error("Page not found")]
    PageNotFound(i64),

    #[error("Movie with ID {0} not found")]
    MovieNotFound(MovieId),

    #[error("Invalid query string")]
    InvalidQuery(String),

    #[error("Not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPage(_) | ApiError::InvalidMovieId(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PageNotFound(_) | ApiError::MovieNotFound(_) | ApiError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidPage(raw)
            | ApiError::InvalidMovieId(raw)
            | ApiError::InvalidQuery(raw) => {
                warn!("Rejecting request: {} ({:?})", self, raw)
            }
            _ => debug!("{}", self),
        }
        let body = match &self {
            ApiError::PageNotFound(page) => json!({
                "error": self.to_string(),
                "requestedPage": page
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}
