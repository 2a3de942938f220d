// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use crate::request::OperationRequest;
use crate::request::require;

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct MfaConfig {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum MfaChannelType {
    Email,
    Nexmo,
}

utils::wire_enum_strings!(MfaChannelType {
    Email => "email",
    Nexmo => "nexmo",
});

/// Credentials for the SMS provider. Unused by the email channel.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct MfaChannelConfig {
    pub key: String,

    pub secret: String,

    pub from: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MfaChannel {
    #[serde(rename = "type")]
    pub channel_type: MfaChannelType,

    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<MfaChannelConfig>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct MfaChannelList {
    #[serde(default)]
    pub channels: Vec<MfaChannel>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMfaChannelRequest {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<MfaChannelConfig>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum MfaExtensionName {
    Premfa,
    Postmfa,
}

utils::wire_enum_strings!(MfaExtensionName {
    Premfa => "premfa",
    Postmfa => "postmfa",
});

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct ExtensionTarget {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
}

/// A pre-MFA or post-MFA webhook.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ExtensionTarget>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionActive {
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionTestResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
}

impl AppIdManagement {
    pub async fn get_mfa_config(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<MfaConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetMFAConfig",
            "config/cloud_directory/mfa",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn update_mfa_config(
        &self,
        body: &MfaConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<MfaConfig>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UpdateMFAConfig",
            "config/cloud_directory/mfa",
            &[],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn list_channels(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<MfaChannelList>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "ListChannels",
            "config/cloud_directory/mfa/channels",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn get_channel(
        &self,
        channel: MfaChannelType,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<MfaChannel>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetChannel",
            "config/cloud_directory/mfa/channels/{channel}",
            &[("channel", channel.as_str())],
        )?;

        self.send(request, options).await
    }

    pub async fn update_channel(
        &self,
        channel: MfaChannelType,
        body: &UpdateMfaChannelRequest,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<MfaChannel>, Error> {
        if channel == MfaChannelType::Nexmo && body.is_active {
            let Some(config) = &body.config else {
                return Err(Error::missing("config"));
            };
            require("config.key", &config.key)?;
            require("config.secret", &config.secret)?;
        }

        let request = OperationRequest::new(
            Method::PUT,
            "UpdateChannel",
            "config/cloud_directory/mfa/channels/{channel}",
            &[("channel", channel.as_str())],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn get_extension(
        &self,
        name: MfaExtensionName,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ExtensionConfig>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetExtensionConfig",
            "config/cloud_directory/mfa/extensions/{name}",
            &[("name", name.as_str())],
        )?;

        self.send(request, options).await
    }

    pub async fn update_extension_config(
        &self,
        name: MfaExtensionName,
        body: &ExtensionConfig,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ExtensionConfig>, Error> {
        if let Some(target) = &body.config {
            require("config.url", &target.url)?;
        }

        let request = OperationRequest::new(
            Method::PUT,
            "UpdateExtensionConfig",
            "config/cloud_directory/mfa/extensions/{name}",
            &[("name", name.as_str())],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    pub async fn update_extension_active(
        &self,
        name: MfaExtensionName,
        body: &ExtensionActive,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ExtensionActive>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "UpdateExtensionActive",
            "config/cloud_directory/mfa/extensions/{name}/active",
            &[("name", name.as_str())],
        )?
        .json(body)?;

        self.send(request, options).await
    }

    /// Fire the configured webhook once and report how it answered.
    pub async fn post_extensions_test(
        &self,
        name: MfaExtensionName,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ExtensionTestResult>, Error> {
        let request = OperationRequest::new(
            Method::POST,
            "PostExtensionsTest",
            "config/cloud_directory/mfa/extensions/{name}/test",
            &[("name", name.as_str())],
        )?;

        self.send(request, options).await
    }
}
