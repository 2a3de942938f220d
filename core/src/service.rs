// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use http::HeaderValue;
use http::header::ACCEPT;
use http::header::CONTENT_TYPE;
use http::header::USER_AGENT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use slog::Logger;
use slog::debug;
use slog::o;
use slog::warn;
use std::sync::Arc;
use std::time::Duration;

use crate::request::OperationRequest;
use crate::request::RequestBody;
use crate::request::check_path_value;
use crate::request::parse_headers;

pub const DEFAULT_SERVICE_URL: &str = "https://us-south.appid.cloud.ibm.com";
pub const DEFAULT_SERVICE_NAME: &str = "appid_management";
pub const SERVICE_VERSION: &str = "V4";

const SDK_USER_AGENT: &str =
    concat!("appid-management-rust-sdk/", env!("CARGO_PKG_VERSION"));
const SDK_ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

/// The public endpoint for a region, e.g. `eu-gb`.
pub fn service_url_for_region(region: &str) -> String {
    format!("https://{region}.appid.cloud.ibm.com")
}

/// Client for one App ID tenant.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct AppIdManagement {
    client: reqwest::Client,
    base_url: Url,
    tenant_id: String,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HeaderMap,
    log: Logger,
}

impl std::fmt::Debug for AppIdManagement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AppIdManagement")
            .field("base_url", &self.base_url.as_str())
            .field("tenant_id", &self.tenant_id)
            .field("authenticator", &self.authenticator)
            .finish()
    }
}

pub struct AppIdManagementBuilder {
    url: String,
    tenant_id: String,
    authenticator: Option<Arc<dyn Authenticator>>,
    default_headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    disable_ssl_verification: bool,
    log: Option<Logger>,
}

impl AppIdManagementBuilder {
    fn new(tenant_id: String) -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            tenant_id,
            authenticator: None,
            default_headers: Vec::new(),
            timeout: None,
            disable_ssl_verification: false,
            log: None,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Shorthand for `url(service_url_for_region(region))`.
    pub fn region(self, region: &str) -> Self {
        self.url(service_url_for_region(region))
    }

    pub fn authenticator<A>(mut self, authenticator: A) -> Self
    where
        A: Authenticator + 'static,
    {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    pub fn shared_authenticator(
        mut self,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// A header sent with every request.
    pub fn default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }

    pub fn log(mut self, log: Logger) -> Self {
        self.log = Some(log);
        self
    }

    pub fn build(self) -> Result<AppIdManagement, Error> {
        if let Err(e) = check_path_value("tenant id", &self.tenant_id) {
            return Err(Error::InvalidConfig(e.to_string()));
        }

        let base_url = Url::parse(&self.url).map_err(|e| {
            Error::InvalidConfig(format!(
                "invalid service url {}: {e}",
                self.url
            ))
        })?;

        if !matches!(base_url.scheme(), "http" | "https")
            || base_url.cannot_be_a_base()
        {
            return Err(Error::InvalidConfig(format!(
                "service url {} must be an http or https url",
                self.url
            )));
        }

        let Some(authenticator) = self.authenticator else {
            return Err(Error::InvalidConfig(
                "an authenticator must be provided".to_string(),
            ));
        };
        authenticator.validate()?;

        let default_headers =
            parse_headers(&self.default_headers).map_err(|e| {
                Error::InvalidConfig(format!("default headers: {e}"))
            })?;

        let mut client = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.disable_ssl_verification);
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client.build().map_err(|e| {
            Error::InvalidConfig(format!("building http client failed: {e}"))
        })?;

        let log = self
            .log
            .unwrap_or_else(|| Logger::root(slog::Discard, o!()))
            .new(o!(
                "component" => "appid-management",
                "tenant_id" => self.tenant_id.clone()
            ));

        Ok(AppIdManagement {
            client,
            base_url,
            tenant_id: self.tenant_id,
            authenticator,
            default_headers,
            log,
        })
    }
}

impl AppIdManagement {
    pub fn builder(tenant_id: impl Into<String>) -> AppIdManagementBuilder {
        AppIdManagementBuilder::new(tenant_id.into())
    }

    /// Build a client from `<SERVICE_NAME>_*` environment variables.
    ///
    /// Reads `_URL`, `_TENANT_ID`, `_AUTH_TYPE` (`bearerToken` or `noAuth`),
    /// `_BEARER_TOKEN` and `_DISABLE_SSL`.
    pub fn from_env(service_name: &str) -> Result<Self, Error> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())?.build()
    }

    pub(crate) fn from_lookup<F>(
        service_name: &str,
        lookup: F,
    ) -> Result<AppIdManagementBuilder, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let var = |suffix: &str| {
            lookup(&format!("{prefix}_{suffix}"))
                .filter(|value| !value.trim().is_empty())
        };

        let Some(tenant_id) = var("TENANT_ID") else {
            return Err(Error::InvalidConfig(format!(
                "{prefix}_TENANT_ID is not set"
            )));
        };

        let mut builder = Self::builder(tenant_id);

        if let Some(url) = var("URL") {
            builder = builder.url(url);
        }

        if let Some(disable) = var("DISABLE_SSL") {
            let disable = disable.eq_ignore_ascii_case("true");
            builder = builder.disable_ssl_verification(disable);
        }

        let auth_type = var("AUTH_TYPE").unwrap_or_else(|| {
            if var("BEARER_TOKEN").is_some() {
                AUTHTYPE_BEARER_TOKEN.to_string()
            } else {
                String::new()
            }
        });

        builder = if auth_type.eq_ignore_ascii_case(AUTHTYPE_BEARER_TOKEN) {
            let Some(token) = var("BEARER_TOKEN") else {
                return Err(Error::InvalidConfig(format!(
                    "{prefix}_BEARER_TOKEN is not set"
                )));
            };
            builder.authenticator(BearerTokenAuthenticator::new(token))
        } else if auth_type.eq_ignore_ascii_case(AUTHTYPE_NOAUTH) {
            builder.authenticator(NoAuthAuthenticator)
        } else {
            return Err(Error::InvalidConfig(format!(
                "unsupported {prefix}_AUTH_TYPE {auth_type:?}"
            )));
        };

        Ok(builder)
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn service_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url_for(&self, segments: &[String]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidConfig(format!(
                    "service url {} cannot have a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["management", "v4", self.tenant_id.as_str()])
            .extend(segments);

        Ok(url)
    }

    fn headers_for(
        &self,
        operation_id: &str,
        accept: &'static str,
        options: Option<&RequestOptions>,
    ) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
        headers.insert(
            SDK_ANALYTICS_HEADER,
            HeaderValue::from_str(&format!(
                "service_name={DEFAULT_SERVICE_NAME};\
                 service_version={SERVICE_VERSION};\
                 operation_id={operation_id}"
            ))
            .map_err(|e| Error::InvalidRequest(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(accept));

        for (name, value) in &self.default_headers {
            headers.insert(name, value.clone());
        }

        self.authenticator.authenticate(&mut headers)?;

        if let Some(options) = options {
            for (name, value) in options.header_map()? {
                if let Some(name) = name {
                    headers.insert(name, value);
                }
            }
        }

        Ok(headers)
    }

    /// Send one request and hand back the raw status, headers and body of a
    /// 2xx reply. Anything else becomes `Error::ErrorResponse`.
    async fn execute(
        &self,
        request: OperationRequest,
        options: Option<RequestOptions>,
    ) -> Result<(StatusCode, HeaderMap, Vec<u8>), Error> {
        let OperationRequest {
            operation_id,
            method,
            segments,
            query,
            body,
            accept,
        } = request;

        let url = self.url_for(&segments)?;
        let headers =
            self.headers_for(operation_id, accept, options.as_ref())?;

        let mut builder =
            self.client.request(method.clone(), url.clone()).headers(headers);

        if !query.is_empty() {
            builder = builder.query(&query);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(bytes),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        if let Some(timeout) =
            options.as_ref().and_then(RequestOptions::timeout_value)
        {
            builder = builder.timeout(timeout);
        }

        debug!(
            self.log, "sending request";
            "operation" => operation_id,
            "method" => %method,
            "url" => %url
        );

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?.to_vec();

        if !status.is_success() {
            let error = ServiceError::from_parts(status, headers, &bytes);

            warn!(
                self.log, "request failed";
                "operation" => operation_id,
                "status" => status.as_u16(),
                "message" => &error.message
            );

            return Err(Error::ErrorResponse(error));
        }

        debug!(
            self.log, "request complete";
            "operation" => operation_id,
            "status" => status.as_u16()
        );

        Ok((status, headers, bytes))
    }

    pub(crate) async fn send<T>(
        &self,
        request: OperationRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<T>, Error>
    where
        T: DeserializeOwned,
    {
        let (status, headers, bytes) = self.execute(request, options).await?;

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(ResponseValue::new(value, status, headers)),
            Err(source) => {
                Err(Error::InvalidResponsePayload { body: bytes, source })
            }
        }
    }

    /// For operations whose reply carries no result.
    pub(crate) async fn send_empty(
        &self,
        request: OperationRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let (status, headers, _) = self.execute(request, options).await?;
        Ok(ResponseValue::new((), status, headers))
    }

    pub(crate) async fn send_text(
        &self,
        request: OperationRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<String>, Error> {
        let (status, headers, bytes) = self.execute(request, options).await?;
        let text =
            String::from_utf8(bytes).map_err(Error::InvalidResponseText)?;
        Ok(ResponseValue::new(text, status, headers))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeMap;

    fn client() -> AppIdManagement {
        AppIdManagement::builder("tenant-1")
            .url("http://127.0.0.1:9999/base/")
            .authenticator(BearerTokenAuthenticator::new("tok"))
            .default_header("X-Default", "d")
            .default_header("X-Override", "default")
            .build()
            .unwrap()
    }

    #[test]
    fn test_url_for() {
        let url = client()
            .url_for(&["roles".to_string(), "a b/c".to_string()])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9999/base/management/v4/tenant-1/roles/a%20b%2Fc"
        );
    }

    #[test]
    fn test_headers_merge_order() {
        let options = RequestOptions::new().header("X-Override", "call");
        let headers = client()
            .headers_for("GetRole", "application/json", Some(&options))
            .unwrap();

        assert_eq!(headers.get("x-default").unwrap(), "d");
        assert_eq!(headers.get("x-override").unwrap(), "call");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer tok");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(
            headers.get(SDK_ANALYTICS_HEADER).unwrap(),
            "service_name=appid_management;service_version=V4;\
             operation_id=GetRole"
        );
        assert!(
            headers
                .get(USER_AGENT)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("appid-management-rust-sdk/")
        );
    }

    #[test]
    fn test_build_requires_tenant() {
        let result = AppIdManagement::builder("")
            .authenticator(NoAuthAuthenticator)
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_rejects_dot_tenant() {
        for tenant in [".", "..", "   "] {
            let result = AppIdManagement::builder(tenant)
                .authenticator(NoAuthAuthenticator)
                .build();
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_build_requires_authenticator() {
        let result = AppIdManagement::builder("t").build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_rejects_bad_url() {
        let result = AppIdManagement::builder("t")
            .url("mailto:someone@example.com")
            .authenticator(NoAuthAuthenticator)
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_region_url() {
        let client = AppIdManagement::builder("t")
            .region("eu-gb")
            .authenticator(NoAuthAuthenticator)
            .build()
            .unwrap();
        assert_eq!(client.service_url(), "https://eu-gb.appid.cloud.ibm.com/");
    }

    fn lookup(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_bearer() {
        let client = AppIdManagement::from_lookup(
            "appid_management",
            lookup(&[
                ("APPID_MANAGEMENT_TENANT_ID", "abc"),
                ("APPID_MANAGEMENT_URL", "http://localhost:1234"),
                ("APPID_MANAGEMENT_BEARER_TOKEN", "t0k3n"),
            ]),
        )
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(client.tenant_id(), "abc");
        assert_eq!(client.service_url(), "http://localhost:1234/");
        assert_eq!(
            client.authenticator.authentication_type(),
            AUTHTYPE_BEARER_TOKEN
        );
    }

    #[test]
    fn test_from_lookup_noauth() {
        let client = AppIdManagement::from_lookup(
            "appid-management",
            lookup(&[
                ("APPID_MANAGEMENT_TENANT_ID", "abc"),
                ("APPID_MANAGEMENT_AUTH_TYPE", "NOAUTH"),
            ]),
        )
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(
            client.service_url(),
            "https://us-south.appid.cloud.ibm.com/"
        );
        assert_eq!(client.authenticator.authentication_type(), AUTHTYPE_NOAUTH);
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let result = AppIdManagement::from_lookup(
            "appid_management",
            lookup(&[
                ("APPID_MANAGEMENT_TENANT_ID", "abc"),
                ("APPID_MANAGEMENT_AUTH_TYPE", "bearerToken"),
            ]),
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_lookup_missing_tenant() {
        let result =
            AppIdManagement::from_lookup("appid_management", lookup(&[]));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
