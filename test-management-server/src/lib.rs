// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An in-memory stand-in for the App ID management API, good enough to run
//! the client against in tests.

use anyhow::anyhow;
use dropshot::ApiDescription;
use dropshot::Body;
use dropshot::ConfigDropshot;
use dropshot::HttpError;
use dropshot::HttpServer;
use dropshot::Path;
use dropshot::Query;
use dropshot::RequestContext;
use dropshot::ServerBuilder;
use dropshot::TypedBody;
use dropshot::endpoint;
use http::Response;
use http::StatusCode;
use http::header::AUTHORIZATION;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use slog::Drain;
use std::net::SocketAddr;
use std::sync::Arc;

mod applications;
mod cloud_directory;
mod config;
mod error;
mod roles;
mod store;
mod users;

pub use error::ApiError;
pub use store::ManagementStore;

pub struct ServerContext {
    pub store: ManagementStore,
    bearer_token: Option<String>,
}

impl ServerContext {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self { store: ManagementStore::default(), bearer_token }
    }

    /// With a bearer token configured, every request must present it.
    fn authorize(
        &self,
        rqctx: &RequestContext<Arc<ServerContext>>,
    ) -> Result<(), ApiError> {
        let Some(token) = &self.bearer_token else {
            return Ok(());
        };

        let presented = rqctx
            .request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match presented {
            Some(presented) if presented == token => Ok(()),
            _ => Err(ApiError::unauthorized()),
        }
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct TenantPathParam {
    tenant_id: String,
}

pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, http::Error> {
    match serde_json::to_string(body) {
        Ok(serialized) => Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(serialized.into()),

        Err(e) => ApiError::internal_error(format!(
            "serializing response failed: {e}"
        ))
        .to_http_response(),
    }
}

/// Turn a store result into the HTTP reply: `status` with the JSON body on
/// success, the error document otherwise.
pub(crate) fn respond<T: Serialize>(
    result: Result<T, ApiError>,
    status: StatusCode,
) -> Result<Response<Body>, HttpError> {
    let response = match result {
        Ok(body) => json_response(status, &body),
        Err(error) => error.to_http_response(),
    };

    response.map_err(HttpError::from)
}

pub(crate) fn respond_no_content(
    result: Result<(), ApiError>,
) -> Result<Response<Body>, HttpError> {
    let response = match result {
        Ok(()) => Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::empty()),
        Err(error) => error.to_http_response(),
    };

    response.map_err(HttpError::from)
}

fn register_error(e: impl std::fmt::Display) -> anyhow::Error {
    anyhow!("registering endpoint failed: {e}")
}

pub fn api() -> anyhow::Result<ApiDescription<Arc<ServerContext>>> {
    let mut api = ApiDescription::new();

    api.register(applications::list_applications).map_err(register_error)?;
    api.register(applications::register_application)
        .map_err(register_error)?;
    api.register(applications::get_application).map_err(register_error)?;
    api.register(applications::update_application).map_err(register_error)?;
    api.register(applications::delete_application).map_err(register_error)?;
    api.register(applications::get_application_scopes)
        .map_err(register_error)?;
    api.register(applications::put_application_scopes)
        .map_err(register_error)?;
    api.register(applications::get_application_roles)
        .map_err(register_error)?;
    api.register(applications::put_application_roles)
        .map_err(register_error)?;

    api.register(roles::list_roles).map_err(register_error)?;
    api.register(roles::create_role).map_err(register_error)?;
    api.register(roles::get_role).map_err(register_error)?;
    api.register(roles::update_role).map_err(register_error)?;
    api.register(roles::delete_role).map_err(register_error)?;

    api.register(cloud_directory::list_users).map_err(register_error)?;
    api.register(cloud_directory::create_user).map_err(register_error)?;
    api.register(cloud_directory::get_user).map_err(register_error)?;
    api.register(cloud_directory::update_user).map_err(register_error)?;
    api.register(cloud_directory::delete_user).map_err(register_error)?;

    api.register(users::get_user_roles).map_err(register_error)?;
    api.register(users::update_user_roles).map_err(register_error)?;

    api.register(config::get_document).map_err(register_error)?;
    api.register(config::put_document).map_err(register_error)?;
    api.register(config::delete_document).map_err(register_error)?;

    Ok(api)
}

fn create_logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, slog::Level::Info).fuse();

    slog::Logger::root(drain, slog::o!("component" => "appid-test-server"))
}

/// Start serving on `bind_address`, or an ephemeral localhost port when
/// `None`. Use `HttpServer::local_addr` to find out where.
pub fn create_http_server(
    bind_address: Option<SocketAddr>,
    bearer_token: Option<String>,
) -> anyhow::Result<HttpServer<Arc<ServerContext>>> {
    let log = create_logger();
    let context = Arc::new(ServerContext::new(bearer_token));

    let config = ConfigDropshot {
        bind_address: bind_address
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 0))),
        default_request_body_max_bytes: 1024 * 1024,
        ..Default::default()
    };

    ServerBuilder::new(api()?, context, log)
        .config(config)
        .start()
        .map_err(|e| anyhow!("starting server failed: {e}"))
}
