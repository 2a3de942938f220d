// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;

/// Copies a claim from an identity provider (or the user's attributes) into
/// an issued token.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaimMapping {
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_claim: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_claim: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct AccessTokenExpiry {
    pub expires_in: u64,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct RefreshTokenConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct AnonymousAccessConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct TokensConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_token_claims: Vec<TokenClaimMapping>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_token_claims: Vec<TokenClaimMapping>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessTokenExpiry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshTokenConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_access: Option<AnonymousAccessConfig>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct RedirectUris {
    #[serde(default)]
    pub redirect_uris: Vec<String>,

    #[serde(
        rename = "trustCloudIAMRedirectUris",
        skip_serializing_if = "Option::is_none"
    )]
    pub trust_cloud_iam_redirect_uris: Option<bool>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct UserProfilesConfig {
    pub is_active: bool,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct AuditStatus {
    pub is_active: bool,
}

impl AppIdManagement {
    pub async fn get_tokens_config(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<TokensConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetTokensConfig",
            "config/tokens",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn put_tokens_config(
        &self,
        body: &TokensConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<TokensConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "PutTokensConfig",
            "config/tokens",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_redirect_uris(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<RedirectUris>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetRedirectUris",
            "config/redirect_uris",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn update_redirect_uris(
        &self,
        body: &RedirectUris,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UpdateRedirectUris",
            "config/redirect_uris",
            &[],
        )?
        .json(body)?;

        self.send_empty(request, options).await
    }

    pub async fn get_user_profiles_config(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<UserProfilesConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetUserProfilesConfig",
            "config/users_profile",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn update_user_profiles_config(
        &self,
        body: &UserProfilesConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UpdateUserProfilesConfig",
            "config/users_profile",
            &[],
        )?
        .json(body)?;

        self.send_empty(request, options).await
    }

    pub async fn get_audit_status(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<AuditStatus>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetAuditStatus",
            "config/capture_runtime_activity",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn set_audit_status(
        &self,
        body: &AuditStatus,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "SetAuditStatus",
            "config/capture_runtime_activity",
            &[],
        )?
        .json(body)?;

        self.send_empty(request, options).await
    }
}
