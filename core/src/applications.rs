// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;
use crate::request::require;

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
pub enum ApplicationType {
    #[serde(rename = "regularwebapp")]
    RegularWebApp,

    #[serde(rename = "singlepageapp")]
    SinglePageApp,
}

utils::wire_enum_strings!(ApplicationType {
    RegularWebApp => "regularwebapp",
    SinglePageApp => "singlepageapp",
});

/// An application registered with the tenant.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub client_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub o_auth_server_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_endpoint: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct ApplicationsList {
    #[serde(default)]
    pub applications: Vec<Application>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct RegisterApplicationRequest {
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,
}

impl RegisterApplicationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), application_type: None }
    }

    pub fn with_type(mut self, application_type: ApplicationType) -> Self {
        self.application_type = Some(application_type);
        self
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct UpdateApplicationRequest {
    pub name: String,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct ApplicationScopes {
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// A role as it appears when attached to an application or a user.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct RoleRef {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct RoleRefList {
    #[serde(default)]
    pub roles: Vec<RoleRef>,
}

/// The reply to a role assignment: the roles now held.
pub type AssignedRoles = RoleRefList;

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct RoleIds {
    pub ids: Vec<String>,
}

/// Replaces the full set of roles held by an application or a user.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct UpdateRolesRequest {
    pub roles: RoleIds,
}

impl UpdateRolesRequest {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        Self { roles: RoleIds { ids } }
    }
}

impl AppIdManagement {
    pub async fn list_applications(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ApplicationsList>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "ListApplications",
            "applications",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn register_application(
        &self,
        body: &RegisterApplicationRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Application>, Error> {
        require("name", &body.name)?;

        let request = OperationRequest::new(
            Method::POST,
            "RegisterApplication",
            "applications",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_application(
        &self,
        client_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Application>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetApplication",
            "applications/{clientId}",
            &[("clientId", client_id)],
        )?;

        self.send(request, options).await
    }

    pub async fn update_application(
        &self,
        client_id: &str,
        body: &UpdateApplicationRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Application>, Error> {
        require("name", &body.name)?;

        let request = OperationRequest::new(
            Method::PUT,
            "UpdateApplication",
            "applications/{clientId}",
            &[("clientId", client_id)],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn delete_application(
        &self,
        client_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::DELETE,
            "DeleteApplication",
            "applications/{clientId}",
            &[("clientId", client_id)],
        )?;

        self.send_empty(request, options).await
    }

    pub async fn get_application_scopes(
        &self,
        client_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ApplicationScopes>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetApplicationScopes",
            "applications/{clientId}/scopes",
            &[("clientId", client_id)],
        )?;

        self.send(request, options).await
    }

    pub async fn put_application_scopes(
        &self,
        client_id: &str,
        body: &ApplicationScopes,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ApplicationScopes>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "PutApplicationsScopes",
            "applications/{clientId}/scopes",
            &[("clientId", client_id)],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_application_roles(
        &self,
        client_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<RoleRefList>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetApplicationRoles",
            "applications/{clientId}/roles",
            &[("clientId", client_id)],
        )?;

        self.send(request, options).await
    }

    pub async fn put_application_roles(
        &self,
        client_id: &str,
        body: &UpdateRolesRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<AssignedRoles>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "PutApplicationsRoles",
            "applications/{clientId}/roles",
            &[("clientId", client_id)],
        )?
        .json(body)?;

        self.send(request, options).await
    }
}
