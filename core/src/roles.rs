// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;
use crate::request::require;

/// The scopes of one application granted by a role.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct RoleAccess {
    pub application_id: String,

    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct Role {
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub access: Vec<RoleAccess>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct RolesList {
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Body for both creating and replacing a role.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct RoleRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub access: Vec<RoleAccess>,
}

impl RoleRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None, access: Vec::new() }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn grant<I, S>(mut self, application_id: &str, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access.push(RoleAccess {
            application_id: application_id.to_string(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        });
        self
    }

    fn validate(&self) -> Result<(), Error> {
        require("name", &self.name)?;
        for access in &self.access {
            require("access.application_id", &access.application_id)?;
        }
        Ok(())
    }
}

impl AppIdManagement {
    pub async fn list_roles(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<RolesList>, Error> {
        let request =
            OperationRequest::new(Method::GET, "ListRoles", "roles", &[])?;

        self.send(request, options).await
    }

    pub async fn create_role(
        &self,
        body: &RoleRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Role>, Error> {
        body.validate()?;

        let request =
            OperationRequest::new(Method::POST, "CreateRole", "roles", &[])?
                .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_role(
        &self,
        role_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Role>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetRole",
            "roles/{roleId}",
            &[("roleId", role_id)],
        )?;

        self.send(request, options).await
    }

    pub async fn update_role(
        &self,
        role_id: &str,
        body: &RoleRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Role>, Error> {
        body.validate()?;

        let request = OperationRequest::new(
            Method::PUT,
            "UpdateRole",
            "roles/{roleId}",
            &[("roleId", role_id)],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn delete_role(
        &self,
        role_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::DELETE,
            "DeleteRole",
            "roles/{roleId}",
            &[("roleId", role_id)],
        )?;

        self.send_empty(request, options).await
    }
}
