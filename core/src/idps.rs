// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;
use crate::request::require;

/// Client credentials registered with a social provider.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SocialIdpCredentials {
    pub idp_id: String,

    pub secret: String,
}

/// Facebook and Google share this shape.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SocialIdpConfig {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SocialIdpCredentials>,

    #[serde(rename = "redirectURL", skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl SocialIdpConfig {
    fn validate(&self) -> Result<(), Error> {
        if !self.is_active {
            return Ok(());
        }

        let Some(credentials) = &self.config else {
            return Err(Error::missing("config"));
        };
        require("config.idpId", &credentials.idp_id)?;
        require("config.secret", &credentials.secret)
    }
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct CustomIdpSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct CustomIdpConfig {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CustomIdpSettings>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentityConfirmationAccessMode {
    Full,
    Restrictive,
    Off,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityConfirmation {
    pub access_mode: IdentityConfirmationAccessMode,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudDirectoryInteractions {
    pub identity_confirmation: IdentityConfirmation,

    pub welcome_enabled: bool,

    pub reset_password_enabled: bool,

    pub reset_password_notification_enable: bool,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
pub enum IdentityField {
    #[serde(rename = "email")]
    Email,

    #[serde(rename = "userName")]
    UserName,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudDirectorySettings {
    pub self_service_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_up_enabled: Option<bool>,

    pub interactions: CloudDirectoryInteractions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_field: Option<IdentityField>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudDirectoryIdpConfig {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CloudDirectorySettings>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct AuthnContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SamlSettings {
    #[serde(rename = "entityID")]
    pub entity_id: String,

    pub sign_in_url: String,

    #[serde(default)]
    pub certificates: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authn_context: Option<AuthnContext>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_request: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypt_response: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_scoping: Option<bool>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SamlIdpConfig {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SamlSettings>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct CertificateValidation {
    #[serde(default)]
    pub certificate_index: u32,

    #[serde(default)]
    pub expire_in_days: i64,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct SamlValidationData {
    #[serde(default)]
    pub certificates: Vec<CertificateValidation>,
}

/// The stored SAML configuration plus any certificate expiry warnings.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct SamlIdpResponse {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SamlSettings>,

    #[serde(
        rename = "validation_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub validation_data: Option<SamlValidationData>,
}

impl AppIdManagement {
    /// The service provider metadata document to hand to a SAML identity
    /// provider.
    pub async fn get_saml_metadata(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<String>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetSAMLMetadata",
            "config/saml_metadata",
            &[],
        )?
        .accept("application/xml");

        self.send_text(request, options).await
    }

    pub async fn get_facebook_idp(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SocialIdpConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetFacebookIDP",
            "config/idps/facebook",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_facebook_idp(
        &self,
        body: &SocialIdpConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SocialIdpConfig>, Error> {
        body.validate()?;

        let request = OperationRequest::new(
            Method::PUT,
            "SetFacebookIDP",
            "config/idps/facebook",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_google_idp(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SocialIdpConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetGoogleIDP",
            "config/idps/google",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_google_idp(
        &self,
        body: &SocialIdpConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SocialIdpConfig>, Error> {
        body.validate()?;

        let request = OperationRequest::new(
            Method::PUT,
            "SetGoogleIDP",
            "config/idps/google",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_custom_idp(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CustomIdpConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCustomIDP",
            "config/idps/custom",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_custom_idp(
        &self,
        body: &CustomIdpConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CustomIdpConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "SetCustomIDP",
            "config/idps/custom",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_cloud_directory_idp(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryIdpConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetCloudDirectoryIDP",
            "config/idps/cloud_directory",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_cloud_directory_idp(
        &self,
        body: &CloudDirectoryIdpConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<CloudDirectoryIdpConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "SetCloudDirectoryIDP",
            "config/idps/cloud_directory",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_saml_idp(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SamlIdpConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetSAMLIDP",
            "config/idps/saml",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_saml_idp(
        &self,
        body: &SamlIdpConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<SamlIdpResponse>, Error> {
        if let Some(settings) = &body.config {
            require("config.entityID", &settings.entity_id)?;
            require("config.signInUrl", &settings.sign_in_url)?;
            if settings.certificates.is_empty() {
                return Err(Error::missing("config.certificates"));
            }
        } else if body.is_active {
            return Err(Error::missing("config"));
        }

        let request = OperationRequest::new(
            Method::PUT,
            "SetSAMLIDP",
            "config/idps/saml",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }
}
