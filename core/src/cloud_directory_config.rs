// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;
use crate::request::require;

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateName {
    UserVerification,
    ResetPassword,
    Welcome,
    PasswordChanged,
    MfaVerification,
}

utils::wire_enum_strings!(TemplateName {
    UserVerification => "USER_VERIFICATION",
    ResetPassword => "RESET_PASSWORD",
    Welcome => "WELCOME",
    PasswordChanged => "PASSWORD_CHANGED",
    MfaVerification => "MFA_VERIFICATION",
});

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct EmailTemplate {
    pub subject: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_encoded_html_body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text_body: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct EmailAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub email: String,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SenderDetails {
    pub from: EmailAddress,

    #[serde(rename = "reply_to", skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EmailAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_expiration_sec: Option<u64>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SenderDetailsConfig {
    pub sender_details: SenderDetails,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct PasswordRegexConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_encoded_regex: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Sendgrid,
    Custom,
    Appid,
}

utils::wire_enum_strings!(EmailProvider {
    Sendgrid => "sendgrid",
    Custom => "custom",
    Appid => "appid",
});

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SendgridConfig {
    pub api_key: String,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum DispatcherAuthorizationType {
    Value,
    Basic,
    None,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct DispatcherAuthorization {
    #[serde(rename = "type")]
    pub authorization_type: DispatcherAuthorizationType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct CustomDispatcherConfig {
    pub url: String,

    pub authorization: DispatcherAuthorization,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct EmailDispatcherConfig {
    pub provider: EmailProvider,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sendgrid: Option<SendgridConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomDispatcherConfig>,
}

impl EmailDispatcherConfig {
    /// The settings block matching `provider` must be present.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        match self.provider {
            EmailProvider::Sendgrid if self.sendgrid.is_none() => {
                Err(Error::missing("sendgrid"))
            }
            EmailProvider::Custom if self.custom.is_none() => {
                Err(Error::missing("custom"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettingsTestRequest {
    pub email_to: String,

    pub email_settings: EmailDispatcherConfig,

    pub sender_details: SenderDetails,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettingsTestResult {
    #[serde(default)]
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatcher_status_code: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatcher_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatcher_message: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct SmsDispatcherTestRequest {
    pub phone_number: String,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct SmsDispatcherTestResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// One advanced password management policy: an on/off switch plus its
/// policy-specific settings.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct PasswordPolicy<C> {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<C>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReuseConfig {
    pub max_password_reuse: u32,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct PasswordExpirationConfig {
    pub days_to_expire: u32,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct LockOutPolicyConfig {
    pub lock_out_time_sec: u64,

    pub num_of_attempts: u32,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct MinPasswordChangeIntervalConfig {
    pub min_hours_to_change_password: u32,
}

/// Switches without extra settings.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedPasswordManagement {
    pub enabled: bool,

    pub password_reuse: PasswordPolicy<PasswordReuseConfig>,

    pub prevent_password_with_username: Toggle,

    pub password_expiration: PasswordPolicy<PasswordExpirationConfig>,

    pub lock_out_policy: PasswordPolicy<LockOutPolicyConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_password_change_interval:
        Option<PasswordPolicy<MinPasswordChangeIntervalConfig>>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedPasswordManagementConfig {
    pub advanced_password_management: AdvancedPasswordManagement,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
pub enum ActionUrlAction {
    OnUserVerified,
    OnResetPassword,
}

utils::wire_enum_strings!(ActionUrlAction {
    OnUserVerified => "on_user_verified",
    OnResetPassword => "on_reset_password",
});

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ActionUrl {
    pub action_url: String,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SsoConfig {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactivity_timeout_seconds: Option<u64>,

    #[serde(default)]
    pub logout_redirect_uris: Vec<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    pub sign_up_limit_per_minute: u32,

    pub sign_in_limit_per_minute: u32,
}

impl AppIdManagement {
    pub async fn get_template(
        &self,
        template_name: TemplateName,
        language: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<EmailTemplate>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetTemplate",
            "config/cloud_directory/templates/{templateName}/{language}",
            &[("templateName", template_name.as_str()), ("language", language)],
        )?;

        self.send(request, options).await
    }

    pub async fn update_template(
        &self,
        template_name: TemplateName,
        language: &str,
        body: &EmailTemplate,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<EmailTemplate>, Error> {
        require("subject", &body.subject)?;

        let request = OperationRequest::new(
            Method::PUT,
            "UpdateTemplate",
            "config/cloud_directory/templates/{templateName}/{language}",
            &[("templateName", template_name.as_str()), ("language", language)],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn delete_template(
        &self,
        template_name: TemplateName,
        language: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::DELETE,
            "DeleteTemplate",
            "config/cloud_directory/templates/{templateName}/{language}",
            &[("templateName", template_name.as_str()), ("language", language)],
        )?;

        self.send_empty(request, options).await
    }

    pub async fn get_sender_details(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SenderDetailsConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCloudDirectorySenderDetails",
            "config/cloud_directory/sender_details",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_sender_details(
        &self,
        body: &SenderDetailsConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        require("senderDetails.from.email", &body.sender_details.from.email)?;

        let request = OperationRequest::new(
            Method::PUT,
            "SetCloudDirectorySenderDetails",
            "config/cloud_directory/sender_details",
            &[],
        )?
        .json(body)?;

        self.send_empty(request, options).await
    }

    pub async fn get_password_regex(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<PasswordRegexConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCloudDirectoryPasswordRegex",
            "config/cloud_directory/password_regex",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_password_regex(
        &self,
        body: &PasswordRegexConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<PasswordRegexConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "SetCloudDirectoryPasswordRegex",
            "config/cloud_directory/password_regex",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_email_dispatcher(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<EmailDispatcherConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCloudDirectoryEmailDispatcher",
            "config/cloud_directory/email_dispatcher",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_email_dispatcher(
        &self,
        body: &EmailDispatcherConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<EmailDispatcherConfig>, Error> {
        body.validate()?;

        let request = OperationRequest::new(
            Method::PUT,
            "SetCloudDirectoryEmailDispatcher",
            "config/cloud_directory/email_dispatcher",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    /// Send a test message through the given dispatcher settings without
    /// saving them.
    pub async fn email_setting_test(
        &self,
        body: &EmailSettingsTestRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<EmailSettingsTestResult>, Error> {
        require("emailTo", &body.email_to)?;
        body.email_settings.validate()?;

        let request = OperationRequest::new(
            Method::POST,
            "EmailSettingTest",
            "config/cloud_directory/email_dispatcher/test",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn sms_dispatcher_test(
        &self,
        phone_number: &str,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SmsDispatcherTestResult>, Error> {
        require("phone_number", phone_number)?;

        let request = OperationRequest::new(
            Method::POST,
            "PostSMSDispatcherTest",
            "config/cloud_directory/sms_dispatcher/test",
            &[],
        )?
        .json(&SmsDispatcherTestRequest {
            phone_number: phone_number.to_string(),
        })?;

        self.send(request, options).await
    }

    pub async fn get_advanced_password_management(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<AdvancedPasswordManagementConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCloudDirectoryAdvancedPasswordManagement",
            "config/cloud_directory/advanced_password_management",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_advanced_password_management(
        &self,
        body: &AdvancedPasswordManagementConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<AdvancedPasswordManagementConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "SetCloudDirectoryAdvancedPasswordManagement",
            "config/cloud_directory/advanced_password_management",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_action_url(
        &self,
        action: ActionUrlAction,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ActionUrl>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCloudDirectoryActionURL",
            "config/cloud_directory/action_url/{action}",
            &[("action", action.as_str())],
        )?;

        self.send(request, options).await
    }

    pub async fn set_action_url(
        &self,
        action: ActionUrlAction,
        body: &ActionUrl,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ActionUrl>, Error> {
        require("actionUrl", &body.action_url)?;

        let request = OperationRequest::new(
            Method::PUT,
            "SetCloudDirectoryAction",
            "config/cloud_directory/action_url/{action}",
            &[("action", action.as_str())],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn delete_action_url(
        &self,
        action: ActionUrlAction,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::DELETE,
            "DeleteActionURL",
            "config/cloud_directory/action_url/{action}",
            &[("action", action.as_str())],
        )?;

        self.send_empty(request, options).await
    }

    pub async fn get_sso_config(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SsoConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetSSOConfig",
            "config/cloud_directory/sso",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn update_sso_config(
        &self,
        body: &SsoConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SsoConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UpdateSSOConfig",
            "config/cloud_directory/sso",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_rate_limit_config(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<RateLimitConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetRateLimitConfig",
            "config/cloud_directory/rate_limit",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn update_rate_limit_config(
        &self,
        body: &RateLimitConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<RateLimitConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UpdateRateLimitConfig",
            "config/cloud_directory/rate_limit",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }
}
