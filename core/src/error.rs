// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// Errors returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required parameter is missing or invalid. Nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The client could not be constructed from the supplied settings.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The request never produced an HTTP response (connection refused,
    /// timeout, TLS failure, ...).
    #[error("communication error: {0}")]
    Communication(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{0}")]
    ErrorResponse(ServiceError),

    /// The service answered 2xx but the body did not decode into the
    /// expected type.
    #[error("invalid response payload: {source}")]
    InvalidResponsePayload {
        body: Vec<u8>,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered 2xx with a text body that is not UTF-8.
    #[error("invalid response text: {0}")]
    InvalidResponseText(#[source] std::string::FromUtf8Error),
}

impl Error {
    /// The HTTP status of the response that caused this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ErrorResponse(e) => Some(e.status),
            Error::Communication(e) => e.status(),
            _ => None,
        }
    }

    pub(crate) fn missing(what: &str) -> Self {
        Error::InvalidRequest(format!("{what} must be provided"))
    }
}

/// A non-2xx reply from the service.
#[derive(Debug, Clone)]
pub struct ServiceError {
    pub status: StatusCode,

    pub headers: HeaderMap,

    /// Best-effort human readable message pulled out of the body.
    pub message: String,

    /// The body, if it was JSON.
    pub body: Option<Value>,
}

impl ServiceError {
    pub(crate) fn from_parts(
        status: StatusCode,
        headers: HeaderMap,
        bytes: &[u8],
    ) -> Self {
        let body: Option<Value> = serde_json::from_slice(bytes).ok();

        let message = body
            .as_ref()
            .and_then(error_message_from_body)
            .unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("Unknown Error").to_string()
            });

        Self { status, headers, message, body }
    }

    /// The service error code (`code` or `errorCode`), when the body has one.
    pub fn code(&self) -> Option<&str> {
        let body = self.body.as_ref()?;
        body.get("code")
            .or_else(|| body.get("errorCode"))
            .and_then(Value::as_str)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "error response {}: {}", self.status.as_u16(), self.message)
    }
}

/// The service is not consistent about where it puts the message, so try the
/// shapes it is known to use, most specific first.
fn error_message_from_body(body: &Value) -> Option<String> {
    if let Some(message) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }

    for key in ["error", "message", "errorMessage"] {
        match body.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),

            // {"error": {"message": ...}}
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("message") {
                    return Some(s.clone());
                }
            }

            _ => {}
        }
    }

    None
}
