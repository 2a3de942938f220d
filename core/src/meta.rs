// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use chrono::DateTime;
use chrono::Utc;

/// Bookkeeping the service attaches to Cloud Directory users.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct UserMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// The `startIndex`/`count` window shared by the paged list operations.
#[derive(
    Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl PageRequest {
    pub fn new(start_index: u64, count: u64) -> Self {
        Self { start_index: Some(start_index), count: Some(count) }
    }
}
