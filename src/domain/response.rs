use serde::{Deserialize, Serialize};

use crate::domain::value::{ErrorName, KnownErrorName};

/// Message used when the exchange itself could not be completed.
pub const UNRESOLVED_MESSAGE: &str = "Unable to fetch data. The request could not be resolved.";

/// Message used when an error response body is not JSON.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str =
    "Internal server error. We're unable to process your request right now, please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub name: ErrorName,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(name: impl Into<ErrorName>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// `application_error` with a custom message.
    pub fn application(message: impl Into<String>) -> Self {
        Self::new(KnownErrorName::ApplicationError, message)
    }

    /// The request never produced a usable response.
    pub fn unresolved() -> Self {
        Self::application(UNRESOLVED_MESSAGE)
    }

    /// The service failed with a body that is not JSON.
    pub fn internal_server_error() -> Self {
        Self::application(INTERNAL_SERVER_ERROR_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Outcome of every client call.
///
/// Exactly one of `data` / `error` is populated. Fields are private so the
/// invariant holds by construction; serialized as `{"data": .., "error": ..}`.
pub struct ApiResult<T> {
    data: Option<T>,
    error: Option<ErrorInfo>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ErrorInfo) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    pub fn into_result(self) -> Result<T, ErrorInfo> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (_, Some(error)) => Err(error),
            (None, None) => Err(ErrorInfo::unresolved()),
        }
    }
}

impl<T> From<ApiResult<T>> for Result<T, ErrorInfo> {
    fn from(value: ApiResult<T>) -> Self {
        value.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Response of `POST /messages`, after wire keys have been camel-cased.
pub struct SendMessageResponse {
    pub id: String,
    pub status: String,
    /// ISO-8601 timestamp.
    pub sent_at: String,
}
