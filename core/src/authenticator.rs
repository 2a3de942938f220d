// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use http::HeaderValue;
use http::header::AUTHORIZATION;

pub const AUTHTYPE_BEARER_TOKEN: &str = "bearerToken";
pub const AUTHTYPE_NOAUTH: &str = "noAuth";

/// Adds credentials to outgoing requests.
///
/// Obtaining a token (for example exchanging an IAM API key) is the
/// caller's business; an authenticator only attaches what it was given.
pub trait Authenticator: std::fmt::Debug + Send + Sync {
    fn authentication_type(&self) -> &'static str;

    /// Checked once when the client is built.
    fn validate(&self) -> Result<(), Error>;

    fn authenticate(&self, headers: &mut HeaderMap) -> Result<(), Error>;
}

/// Sends `Authorization: Bearer <token>` with every request.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Swap in a refreshed token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }
}

// Keep the token out of debug output.
impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Authenticator for BearerTokenAuthenticator {
    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_BEARER_TOKEN
    }

    fn validate(&self) -> Result<(), Error> {
        if self.token.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "bearer token must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn authenticate(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(
                |e| {
                    Error::InvalidConfig(format!(
                        "bearer token is not a valid header value: {e}"
                    ))
                },
            )?;
        value.set_sensitive(true);

        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Sends no credentials. Useful against local mock servers.
#[derive(Clone, Debug, Default)]
pub struct NoAuthAuthenticator;

impl Authenticator for NoAuthAuthenticator {
    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_NOAUTH
    }

    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    fn authenticate(&self, _headers: &mut HeaderMap) -> Result<(), Error> {
        Ok(())
    }
}
