// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// The error document the management API replies with.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,

    pub code: String,

    pub error: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, error: String) -> Self {
        Self { status: status.as_u16(), code: code.to_string(), error }
    }

    pub fn bad_request(error: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", error)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            String::from("missing or invalid bearer token"),
        )
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{kind} {id} not found"),
        )
    }

    pub fn conflict(error: String) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", error)
    }

    pub fn internal_error(error: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", error)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn to_http_response(self) -> Result<Response<Body>, http::Error> {
        let status = self.status_code();

        match serde_json::to_string(&self) {
            Ok(serialized) => Response::builder()
                .status(status)
                .header("Content-Type", "application/json")
                .body(serialized.into()),

            Err(e) => Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(
                    serde_json::json!({
                        "status": 500,
                        "code": "INTERNAL_ERROR",
                        "error": format!("serializing error failed: {e}"),
                    })
                    .to_string()
                    .into(),
                ),
        }
    }
}
