// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed client for the App ID management REST API.
//!
//! Every operation is a method on [`AppIdManagement`]. Each one checks its
//! inputs, resolves the request path under
//! `/management/v4/{tenantId}/`, sends exactly one HTTP request and decodes
//! the JSON reply into a typed value wrapped in [`ResponseValue`].
//!
//! ```no_run
//! use appid_management::AppIdManagement;
//! use appid_management::BearerTokenAuthenticator;
//!
//! # async fn example() -> Result<(), appid_management::Error> {
//! let client = AppIdManagement::builder("my-tenant")
//!     .region("eu-gb")
//!     .authenticator(BearerTokenAuthenticator::new("token"))
//!     .build()?;
//!
//! let applications = client.list_applications(None).await?;
//! for application in &applications.applications {
//!     println!("{:?}", application.name);
//! }
//! # Ok(())
//! # }
//! ```

use http::HeaderMap;
use http::Method;
use http::StatusCode;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

mod applications;
mod authenticator;
mod cloud_directory;
mod cloud_directory_config;
mod config;
mod error;
mod idps;
mod meta;
mod mfa;
mod request;
mod response;
mod roles;
mod service;
mod ui;
mod users;
mod utils;

pub use applications::*;
pub use authenticator::*;
pub use cloud_directory::*;
pub use cloud_directory_config::*;
pub use config::*;
pub use error::*;
pub use idps::*;
pub use meta::*;
pub use mfa::*;
pub use request::RequestOptions;
pub use response::*;
pub use roles::*;
pub use service::*;
pub use ui::*;
pub use users::*;
