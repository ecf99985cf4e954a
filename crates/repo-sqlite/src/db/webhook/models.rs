// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{
    TrackSequence, Webhook, WebhookEntity,
    util::clock::{TimestampMillis, UtcDateTimeMs},
};
use url::Url;

use super::{schema::*, *};

#[derive(Debug, Queryable)]
#[diesel(table_name = webhook)]
pub(crate) struct QueryableRecord {
    pub(crate) id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: String,
    pub(crate) target_url: String,
    pub(crate) min_trigger_count: i64,
    pub(crate) last_delivered_sequence: i64,
}

impl TryFrom<QueryableRecord> for (RecordHeader, WebhookEntity) {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            id,
            row_created_ms,
            row_updated_ms,
            entity_uid,
            target_url,
            min_trigger_count,
            last_delivered_sequence,
        } = from;
        let header = RecordHeader {
            id: id.into(),
            created_at: UtcDateTimeMs::from_unix_timestamp_millis(row_created_ms),
            updated_at: UtcDateTimeMs::from_unix_timestamp_millis(row_updated_ms),
        };
        let target_url = Url::parse(&target_url)?;
        let Ok(min_trigger_count) = min_trigger_count.try_into() else {
            anyhow::bail!("invalid minimum trigger count: {min_trigger_count}");
        };
        let body = Webhook {
            target_url,
            min_trigger_count,
            last_delivered_sequence: TrackSequence::new(last_delivered_sequence),
        };
        let entity = WebhookEntity::new(decode_entity_uid_typed(&entity_uid)?, body);
        Ok((header, entity))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = webhook)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: String,
    pub(crate) target_url: &'a str,
    pub(crate) min_trigger_count: i64,
    pub(crate) last_delivered_sequence: i64,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: UtcDateTimeMs, entity: &'a WebhookEntity) -> Self {
        let row_created_updated_ms = created_at.unix_timestamp_millis();
        let WebhookEntity { uid, body } = entity;
        let Webhook {
            target_url,
            min_trigger_count,
            last_delivered_sequence,
        } = body;
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            entity_uid: encode_entity_uid(uid),
            target_url: target_url.as_str(),
            min_trigger_count: (*min_trigger_count).into(),
            last_delivered_sequence: last_delivered_sequence.value(),
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = webhook)]
pub(crate) struct CursorUpdatableRecord {
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) last_delivered_sequence: i64,
}

impl CursorUpdatableRecord {
    pub(crate) fn bind(updated_at: UtcDateTimeMs, last_delivered_sequence: TrackSequence) -> Self {
        Self {
            row_updated_ms: updated_at.unix_timestamp_millis(),
            last_delivered_sequence: last_delivered_sequence.value(),
        }
    }
}
