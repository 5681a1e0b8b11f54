//! Maps store errors onto HTTP responses.
//!
//! Not-found and validation failures keep the bodies clients of the movie
//! API already expect. Anything else is logged and answered with a generic
//! 500 so internal details never leave the process.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

use crate::{Error, FieldError, FieldErrorKind, ValidationErrors};

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MovieNotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Internal(_) | Error::Io(_) | Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Error::MovieNotFound => json!({ "message": "Movie not found" }),
            Error::Validation(errors) => json!({ "error": errors }),
            other => {
                error!("Request failed: {}", other);
                json!({ "message": "Internal server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Turns an unreadable request body into a validation failure on `body`.
pub fn body_rejection(rejection: JsonRejection) -> Error {
    let error = FieldError::new("body", FieldErrorKind::InvalidType, rejection.body_text());
    Error::Validation(ValidationErrors::from(error))
}
