// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use http::HeaderName;
use http::HeaderValue;
use std::time::Duration;

/// Per-call settings accepted by every operation.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header to this call. It replaces a client default header of the
    /// same name.
    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Give up on this call after `timeout`, overriding the client timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn timeout_value(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap, Error> {
        parse_headers(&self.headers)
    }
}

pub(crate) fn parse_headers(
    headers: &[(String, String)],
) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::new();

    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::InvalidRequest(format!("invalid header name {name:?}: {e}"))
        })?;

        let value = HeaderValue::from_str(value).map_err(|e| {
            Error::InvalidRequest(format!(
                "invalid value for header {name}: {e}"
            ))
        })?;

        map.insert(name, value);
    }

    Ok(map)
}

pub(crate) enum RequestBody {
    Empty,
    Json(Vec<u8>),
    Multipart(reqwest::multipart::Form),
}

/// Everything needed to send one operation, minus the client-wide parts.
pub(crate) struct OperationRequest {
    pub operation_id: &'static str,
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
    pub body: RequestBody,
    pub accept: &'static str,
}

impl OperationRequest {
    pub fn new(
        method: Method,
        operation_id: &'static str,
        template: &'static str,
        params: &[(&str, &str)],
    ) -> Result<Self, Error> {
        Ok(Self {
            operation_id,
            method,
            segments: resolve_path(template, params)?,
            query: Vec::new(),
            body: RequestBody::Empty,
            accept: "application/json",
        })
    }

    pub fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    pub fn query_opt<T: ToString>(
        self,
        name: &'static str,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body).map_err(|e| {
            Error::InvalidRequest(format!(
                "{}: serializing request body failed: {e}",
                self.operation_id
            ))
        })?;

        self.body = RequestBody::Json(bytes);
        Ok(self)
    }

    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn accept(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }
}

/// Turn `a/{b}/c` into path segments, substituting `{b}` from `params`.
///
/// Each substituted value becomes exactly one segment, so a `/` inside a
/// value is percent-encoded rather than splitting the path.
pub(crate) fn resolve_path(
    template: &str,
    params: &[(&str, &str)],
) -> Result<Vec<String>, Error> {
    template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let Some(name) =
                segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
            else {
                return Ok(segment.to_string());
            };

            match params.iter().find(|(param, _)| *param == name) {
                Some((_, value)) => {
                    check_path_value(name, value)?;
                    Ok(value.to_string())
                }
                None => Err(Error::missing(name)),
            }
        })
        .collect()
}

/// A value that must stand as a single path segment. URL normalization
/// would drop `.` and `..`, retargeting the request.
pub(crate) fn check_path_value(name: &str, value: &str) -> Result<(), Error> {
    require(name, value)?;

    if value == "." || value == ".." {
        return Err(Error::InvalidRequest(format!(
            "{name} cannot be {value:?}"
        )));
    }

    Ok(())
}

/// Fails when a required string argument is empty.
pub(crate) fn require(name: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::missing(name));
    }

    Ok(())
}
