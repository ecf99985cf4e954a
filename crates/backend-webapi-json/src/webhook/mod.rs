// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{WebhookEntity, WebhookUid, webhook::TriggerCount};

use super::*;

pub mod create;
pub mod load_one;
pub mod purge;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(rename = "webhookURL")]
    pub webhook_url: String,

    #[serde(rename = "minTriggerValue")]
    pub min_trigger_value: TriggerCount,
}

impl From<aloft_core::Webhook> for Webhook {
    fn from(from: aloft_core::Webhook) -> Self {
        let aloft_core::Webhook {
            target_url,
            min_trigger_count,
            last_delivered_sequence: _,
        } = from;
        Self {
            webhook_url: target_url.into(),
            min_trigger_value: min_trigger_count,
        }
    }
}

fn export_webhook_entity(entity: WebhookEntity) -> Webhook {
    entity.body.into()
}
