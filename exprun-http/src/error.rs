//! Error handling for exprun-http
//!
//! Request problems are answered with a JSON body `{"error": <message>}`.
//! Program failures are not HTTP errors; they travel inside the event stream.

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid query: {0}")]
    Query(#[from] QueryRejection),
}

impl PartialEq<StatusCode> for AppError {
    fn eq(&self, status_code: &StatusCode) -> bool {
        &self.status_code() == status_code
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Query(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
