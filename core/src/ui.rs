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
pub struct ThemeText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_color: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Logo,
}

utils::wire_enum_strings!(MediaType { Logo => "logo" });

/// An image to upload as login widget media.
#[derive(Clone, Debug)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub contents: Vec<u8>,
}

impl MediaFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        contents: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            contents,
        }
    }

    fn into_form(self) -> Result<reqwest::multipart::Form, Error> {
        let part = reqwest::multipart::Part::bytes(self.contents)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| {
                Error::InvalidRequest(format!("invalid media type: {e}"))
            })?;

        Ok(reqwest::multipart::Form::new().part("file", part))
    }
}

#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
pub struct Languages {
    #[serde(default)]
    pub languages: Vec<String>,
}

impl AppIdManagement {
    pub async fn get_theme_text(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ThemeText>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetThemeText",
            "config/ui/theme_text",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn post_theme_text(
        &self,
        body: &ThemeText,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "PostThemeText",
            "config/ui/theme_text",
            &[],
        )?
        .json(body)?;

        self.send_empty(request, options).await
    }

    pub async fn get_theme_color(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<ThemeColor>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetThemeColor",
            "config/ui/theme_color",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn post_theme_color(
        &self,
        body: &ThemeColor,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        let request = OperationRequest::new(
            Method::PUT,
            "PostThemeColor",
            "config/ui/theme_color",
            &[],
        )?
        .json(body)?;

        self.send_empty(request, options).await
    }

    pub async fn get_media(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Media>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetMedia",
            "config/ui/media",
            &[],
        )?;

        self.send(request, options).await
    }

    /// Upload `file` as a multipart form under the part name `file`.
    pub async fn post_media(
        &self,
        media_type: MediaType,
        file: MediaFile,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        require("file_name", &file.file_name)?;
        if file.contents.is_empty() {
            return Err(Error::missing("file"));
        }

        let request = OperationRequest::new(
            Method::POST,
            "PostMedia",
            "config/ui/media",
            &[],
        )?
        .query("mediaType", media_type)
        .multipart(file.into_form()?);

        self.send_empty(request, options).await
    }

    pub async fn get_localization(
        &self,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<Languages>, Error> {
        let request = OperationRequest::new(
            Method::GET,
            "GetLocalization",
            "config/ui/languages",
            &[],
        )?;

        self.send(request, options).await
    }

    pub async fn update_localization(
        &self,
        body: &Languages,
        options: Option<RequestOptions>,
    ) -> Result<ResponseValue<()>, Error> {
        if body.languages.is_empty() {
            return Err(Error::missing("languages"));
        }

        let request = OperationRequest::new(
            Method::PUT,
            "UpdateLocalization",
            "config/ui/languages",
            &[],
        )?
        .json(body)?;

        self.send_empty(request, options).await
    }
}
