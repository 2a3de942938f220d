// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;
use crate::request::require;

/// How much of each matching profile a search returns.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum DataScope {
    Index,
    Full,
}

utils::wire_enum_strings!(DataScope {
    Index => "index",
    Full => "full",
});

#[derive(Clone, Debug, PartialEq)]
pub struct UserSearchQuery {
    pub data_scope: DataScope,
    pub email: Option<String>,
    pub id: Option<String>,
    pub start_index: Option<u64>,
    pub count: Option<u64>,
}

impl UserSearchQuery {
    pub fn new(data_scope: DataScope) -> Self {
        Self {
            data_scope,
            email: None,
            id: None,
            start_index: None,
            count: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn page(mut self, start_index: u64, count: u64) -> Self {
        self.start_index = Some(start_index);
        self.count = Some(count);
        self
    }
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct UserSearchHit {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchResponse {
    #[serde(default)]
    pub total_results: u64,

    #[serde(default)]
    pub items_per_page: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_options: Option<PageRequest>,

    #[serde(default)]
    pub users: Vec<UserSearchHit>,
}

/// Pre-registers a user who has not signed in yet, so attributes can be
/// set ahead of their first login.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct NominateUserRequest {
    pub idp: String,

    #[serde(rename = "idp-identity")]
    pub idp_identity: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileAttributes>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct NominatedUser {
    pub id: String,
}

/// A full user profile as exported and imported.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ExportedUserProfile {
    pub id: String,

    #[serde(default, skip_serializing_if = "utils::skip_serializing_list")]
    pub identities: Option<Vec<UserIdentity>>,

    #[serde(default, skip_serializing_if = "utils::skip_serializing_map")]
    pub attributes: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashed_idp_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashed_email: Option<String>,

    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct UserProfilesExport {
    #[serde(default)]
    pub items_per_page: u64,

    #[serde(default)]
    pub total_results: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_options: Option<PageRequest>,

    #[serde(default)]
    pub users: Vec<ExportedUserProfile>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct UserProfilesImportRequest {
    pub users: Vec<ExportedUserProfile>,
}

impl AppIdManagement {
    pub async fn search_user_profiles(
        &self,
        query: &UserSearchQuery,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<UserSearchResponse>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "UsersSearchUserProfile",
            "users",
            &[],
        )?
        .query("dataScope", query.data_scope)
        .query_opt("email", query.email.as_ref())
        .query_opt("id", query.id.as_ref())
        .query_opt("startIndex", query.start_index)
        .query_opt("count", query.count);

        self.send(request, options).await
    }

    pub async fn nominate_user(
        &self,
        body: &NominateUserRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<NominatedUser>, Error> {
        require("idp", &body.idp)?;
        require("idp-identity", &body.idp_identity)?;

        let request = OperationRequest::new(
            Method::POST,
            "UsersNominateUser",
            "users",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn export_user_profiles(
        &self,
        page: &PageRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<UserProfilesExport>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "UserProfilesExport",
            "users/export",
            &[],
        )?
        .query_opt("startIndex", page.start_index)
        .query_opt("count", page.count);

        self.send(request, options).await
    }

    pub async fn import_user_profiles(
        &self,
        body: &UserProfilesImportRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ImportResponse>, Error> {
        let request = OperationRequest::new(
            Method::POST,
            "UserProfilesImport",
            "users/import",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    /// Remove the profile. Cloud Directory users keep their directory entry;
    /// use `cloud_directory_remove` to drop both.
    pub async fn delete_user_profile(
        &self,
        id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::DELETE,
            "UsersDeleteUserProfile",
            "users/{id}",
            &[("id", id)],
        )?;

        self.send_empty(request, options).await
    }

    pub async fn revoke_refresh_token(
        &self,
        id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::POST,
            "UsersRevokeRefreshToken",
            "users/{id}/revoke_refresh_token",
            &[("id", id)],
        )?;

        self.send_empty(request, options).await
    }

    pub async fn get_user_profile(
        &self,
        id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ProfileAttributes>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "UsersGetUserProfile",
            "users/{id}/profile",
            &[("id", id)],
        )?;

        self.send(request, options).await
    }

    pub async fn set_user_profile(
        &self,
        id: &str,
        body: &ProfileAttributes,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ProfileAttributes>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UsersSetUserProfile",
            "users/{id}/profile",
            &[("id", id)],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_user_roles(
        &self,
        id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<RoleRefList>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetUserRoles",
            "users/{id}/roles",
            &[("id", id)],
        )?;

        self.send(request, options).await
    }

    pub async fn update_user_roles(
        &self,
        id: &str,
        body: &UpdateRolesRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<AssignedRoles>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UpdateUserRoles",
            "users/{id}/roles",
            &[("id", id)],
        )?
        .json(body)?;

        self.send(request, options).await
    }
}
