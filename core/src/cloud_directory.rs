// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;
use crate::request::require;

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct Email {
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

impl Email {
    pub fn primary(value: impl Into<String>) -> Self {
        Self { value: value.into(), primary: Some(true) }
    }
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudDirectoryUserStatus {
    Pending,
    Confirmed,
}

utils::wire_enum_strings!(CloudDirectoryUserStatus {
    Pending => "PENDING",
    Confirmed => "CONFIRMED",
});

/// A user in the tenant's built-in username/password store.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct CloudDirectoryUser {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CloudDirectoryUserStatus>,

    /// Epoch milliseconds until which sign-in is refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<i64>,

    #[serde(default)]
    pub emails: Vec<Email>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<UserMeta>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
}

impl CloudDirectoryUser {
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .find(|e| e.primary == Some(true))
            .or_else(|| self.emails.first())
            .map(|e| e.value.as_str())
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCloudDirectoryUserRequest {
    pub emails: Vec<Email>,

    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CloudDirectoryUserStatus>,
}

impl CreateCloudDirectoryUserRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            emails: vec![Email::primary(email)],
            password: password.into(),
            active: None,
            locked_until: None,
            display_name: None,
            user_name: None,
            status: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        validate_emails(&self.emails)?;
        require("password", &self.password)
    }
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCloudDirectoryUserRequest {
    pub emails: Vec<Email>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CloudDirectoryUserStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn validate_emails(emails: &[Email]) -> Result<(), Error> {
    if emails.is_empty() {
        return Err(Error::missing("emails"));
    }

    for email in emails {
        require("emails[].value", &email.value)?;
    }

    Ok(())
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct CloudDirectoryUserList {
    #[serde(default)]
    pub total_results: u64,

    #[serde(default)]
    pub items_per_page: u64,

    #[serde(rename = "Resources", default)]
    pub resources: Vec<CloudDirectoryUser>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ListCloudDirectoryUsersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// Matched against user names and email addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// A profile's custom attributes.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct ProfileAttributes {
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ExportedCloudDirectoryUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    pub user_name: String,

    #[serde(default)]
    pub emails: Vec<Email>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CloudDirectoryUserStatus>,

    pub password_hash: String,

    pub password_hash_alg: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileAttributes>,

    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct CloudDirectoryExport {
    #[serde(default)]
    pub items_per_page: u64,

    #[serde(default)]
    pub total_results: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_options: Option<PageRequest>,

    #[serde(default)]
    pub users: Vec<ExportedCloudDirectoryUser>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct CloudDirectoryImportRequest {
    pub users: Vec<ExportedCloudDirectoryUser>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailReason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Outcome of a bulk import, for either Cloud Directory users or profiles.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    #[serde(default)]
    pub added: u64,

    #[serde(default)]
    pub failed: u64,

    #[serde(default)]
    pub fail_reasons: Vec<ImportFailReason>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_user_info: Option<Map<String, Value>>,
}

/// The Cloud Directory user joined with its profile.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default)]
    pub identities: Vec<UserIdentity>,

    #[serde(default)]
    pub attributes: Map<String, Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct ConfirmationContext {
    pub context: String,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct ConfirmationResult {
    #[serde(default)]
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct ForgotPasswordRequest {
    /// User name or email address.
    pub user: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub new_password: String,

    /// The Cloud Directory user id.
    pub uuid: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_ip_address: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct ResendNotificationRequest {
    pub uuid: String,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ResendNotificationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl AppIdManagement {
    pub async fn list_cloud_directory_users(
        &self,
        query: &ListCloudDirectoryUsersQuery,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryUserList>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "ListCloudDirectoryUsers",
            "cloud_directory/Users",
            &[],
        )?
        .query_opt("startIndex", query.start_index)
        .query_opt("count", query.count)
        .query_opt("query", query.query.as_ref());

        self.send(request, options).await
    }

    /// Page through `cloud_directory/Users` until every match is collected.
    pub async fn list_all_cloud_directory_users(
        &self,
        query: Option<&str>,
        page_size: u64,
        options: Option<RequestOptions>,
    ) -> Result<Vec<CloudDirectoryUser>, Error> {
        if page_size == 0 {
            return Err(Error::InvalidRequest(
                "page size must be greater than zero".to_string(),
            ));
        }

        let mut users = Vec::new();

        loop {
            let page = self
                .list_cloud_directory_users(
                    &ListCloudDirectoryUsersQuery {
                        start_index: Some(users.len() as u64),
                        count: Some(page_size),
                        query: query.map(str::to_string),
                    },
                    options.clone(),
                )
                .await?
                .into_inner();

            let total = page.total_results;
            if page.resources.is_empty() {
                break;
            }

            users.extend(page.resources);

            if users.len() as u64 >= total {
                break;
            }
        }

        Ok(users)
    }

    pub async fn create_cloud_directory_user(
        &self,
        body: &CreateCloudDirectoryUserRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryUser>, Error> {
        body.validate()?;

        let request = OperationRequest::new(
            Method::POST,
            "CreateCloudDirectoryUser",
            "cloud_directory/Users",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_cloud_directory_user(
        &self,
        user_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryUser>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCloudDirectoryUser",
            "cloud_directory/Users/{userId}",
            &[("userId", user_id)],
        )?;

        self.send(request, options).await
    }

    pub async fn update_cloud_directory_user(
        &self,
        user_id: &str,
        body: &UpdateCloudDirectoryUserRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryUser>, Error> {
        validate_emails(&body.emails)?;

        let request = OperationRequest::new(
            Method::PUT,
            "UpdateCloudDirectoryUser",
            "cloud_directory/Users/{userId}",
            &[("userId", user_id)],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn delete_cloud_directory_user(
        &self,
        user_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::DELETE,
            "DeleteCloudDirectoryUser",
            "cloud_directory/Users/{userId}",
            &[("userId", user_id)],
        )?;

        self.send_empty(request, options).await
    }

    pub async fn invalidate_user_sso_sessions(
        &self,
        user_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::POST,
            "InvalidateUserSSOSessions",
            "cloud_directory/Users/{userId}/sso/logout",
            &[("userId", user_id)],
        )?;

        self.send_empty(request, options).await
    }

    /// Export users with their password hashes, encrypted with
    /// `encryption_secret`.
    pub async fn cloud_directory_export(
        &self,
        encryption_secret: &str,
        page: &PageRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryExport>, Error> {
        require("encryption_secret", encryption_secret)?;

        let request = OperationRequest::new(
            Method::GET,
            "CloudDirectoryExport",
            "cloud_directory/export",
            &[],
        )?
        .query("encryption_secret", encryption_secret)
        .query_opt("startIndex", page.start_index)
        .query_opt("count", page.count);

        self.send(request, options).await
    }

    pub async fn cloud_directory_import(
        &self,
        encryption_secret: &str,
        body: &CloudDirectoryImportRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ImportResponse>, Error> {
        require("encryption_secret", encryption_secret)?;

        let request = OperationRequest::new(
            Method::POST,
            "CloudDirectoryImport",
            "cloud_directory/import",
            &[],
        )?
        .query("encryption_secret", encryption_secret)
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn cloud_directory_get_userinfo(
        &self,
        user_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<UserInfo>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "CloudDirectoryGetUserinfo",
            "cloud_directory/{userId}/userinfo",
            &[("userId", user_id)],
        )?;

        self.send(request, options).await
    }

    /// Sign up a user the way the hosted login page would, sending the
    /// verification email when that is enabled.
    pub async fn start_sign_up(
        &self,
        should_create_profile: bool,
        language: Option<&str>,
        body: &CreateCloudDirectoryUserRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryUser>, Error> {
        body.validate()?;

        let request = OperationRequest::new(
            Method::POST,
            "StartSignUp",
            "cloud_directory/sign_up",
            &[],
        )?
        .query("shouldCreateProfile", should_create_profile)
        .query_opt("language", language)
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn user_verification_result(
        &self,
        context: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ConfirmationResult>, Error> {
        require("context", context)?;

        let request = OperationRequest::new(
            Method::POST,
            "UserVerificationResult",
            "cloud_directory/sign_up/confirmation_result",
            &[],
        )?
        .json(&ConfirmationContext { context: context.to_string() })?;

        self.send(request, options).await
    }

    pub async fn start_forgot_password(
        &self,
        user: &str,
        language: Option<&str>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryUser>, Error> {
        require("user", user)?;

        let request = OperationRequest::new(
            Method::POST,
            "StartForgotPassword",
            "cloud_directory/forgot_password",
            &[],
        )?
        .query_opt("language", language)
        .json(&ForgotPasswordRequest { user: user.to_string() })?;

        self.send(request, options).await
    }

    pub async fn forgot_password_result(
        &self,
        context: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ConfirmationResult>, Error> {
        require("context", context)?;

        let request = OperationRequest::new(
            Method::POST,
            "ForgotPasswordResult",
            "cloud_directory/forgot_password/confirmation_result",
            &[],
        )?
        .json(&ConfirmationContext { context: context.to_string() })?;

        self.send(request, options).await
    }

    pub async fn change_password(
        &self,
        body: &ChangePasswordRequest,
        language: Option<&str>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryUser>, Error> {
        require("newPassword", &body.new_password)?;
        require("uuid", &body.uuid)?;

        let request = OperationRequest::new(
            Method::POST,
            "ChangePassword",
            "cloud_directory/change_password",
            &[],
        )?
        .query_opt("language", language)
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn resend_notification(
        &self,
        template_name: TemplateName,
        uuid: &str,
        language: Option<&str>,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ResendNotificationResponse>, Error> {
        require("uuid", uuid)?;

        let request = OperationRequest::new(
            Method::POST,
            "ResendNotification",
            "cloud_directory/resend/{templateName}",
            &[("templateName", template_name.as_str())],
        )?
        .query_opt("language", language)
        .json(&ResendNotificationRequest { uuid: uuid.to_string() })?;

        self.send(request, options).await
    }

    /// Delete the Cloud Directory user together with its profile.
    pub async fn cloud_directory_remove(
        &self,
        user_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::DELETE,
            "CloudDirectoryRemove",
            "cloud_directory/remove/{userId}",
            &[("userId", user_id)],
        )?;

        self.send_empty(request, options).await
    }
}
