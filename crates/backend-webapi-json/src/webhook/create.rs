// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_usecases::webhook::NewWebhook;
use aloft_usecases_sqlite::webhook as uc;

use super::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "webhookURL")]
    pub webhook_url: String,

    #[serde(rename = "minTriggerValue", default)]
    pub min_trigger_value: Option<TriggerCount>,
}

impl From<RequestBody> for NewWebhook {
    fn from(from: RequestBody) -> Self {
        let RequestBody {
            webhook_url,
            min_trigger_value,
        } = from;
        Self {
            target_url: webhook_url,
            min_trigger_count: min_trigger_value,
        }
    }
}

pub type ResponseBody = CreatedEntity;

pub fn handle_request(
    connection: &mut DbConnection,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let new_webhook = request_body.into();
    connection
        .transaction::<_, Error, _>(|connection| {
            uc::create(connection, new_webhook).map_err(Into::into)
        })
        .map(|entity| CreatedEntity::new(entity.uid))
}
