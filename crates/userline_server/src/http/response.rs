//! JSON response envelope and error mapping for the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::Serialize;
use userline_core::ServiceError;

pub const MSG_BODY_MALFORMED: &str = "Invalid request: body malformed";
pub const MSG_USER_INVALID: &str =
    "Please provide first name, last name and biography for the user";
pub const MSG_USER_NOT_FOUND: &str = "The user with the specified ID does not exist";
pub const MSG_INTERNAL: &str = "something went wrong!";

pub type ApiResult<T> = Result<T, ApiError>;

/// Response body shared by every endpoint. Absent members are omitted.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    /// Maps a service failure; `failure_message` is used for 500s so each
    /// operation reports what could not be done.
    pub fn from_service(event: &str, err: ServiceError, failure_message: &'static str) -> Self {
        match &err {
            ServiceError::Validation(reason) => {
                warn!("event={event} module=http status=invalid reason={reason}");
                Self::bad_request(MSG_USER_INVALID)
            }
            _ if err.is_not_found() => {
                warn!("event={event} module=http status=not_found");
                Self {
                    status: StatusCode::NOT_FOUND,
                    message: MSG_USER_NOT_FOUND,
                }
            }
            _ => {
                error!("event={event} module=http status=error error={err}");
                Self::internal(failure_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::error(self.message))).into_response()
    }
}
