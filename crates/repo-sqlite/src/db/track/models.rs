// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{
    Track, TrackEntity, TrackSequence,
    util::clock::{TimestampMillis, UtcDateTimeMs},
};
use jiff::civil::Date;
use url::Url;

use super::{schema::*, *};

#[derive(Debug, Queryable)]
#[diesel(table_name = track)]
pub(crate) struct QueryableRecord {
    pub(crate) id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) entity_uid: String,
    pub(crate) sequence: i64,
    pub(crate) source_url: String,
    pub(crate) recorded_date: String,
    pub(crate) pilot: String,
    pub(crate) glider_model: String,
    pub(crate) glider_id: String,
    pub(crate) length_meters: f64,
}

impl TryFrom<QueryableRecord> for (RecordHeader, TrackEntity) {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            id,
            row_created_ms,
            entity_uid,
            sequence,
            source_url,
            recorded_date,
            pilot,
            glider_model,
            glider_id,
            length_meters,
        } = from;
        let created_at = UtcDateTimeMs::from_unix_timestamp_millis(row_created_ms);
        let header = RecordHeader {
            id: id.into(),
            created_at,
            // Tracks are immutable
            updated_at: created_at,
        };
        let source_url = Url::parse(&source_url)?;
        let recorded_date = recorded_date.parse::<Date>()?;
        let body = Track {
            sequence: TrackSequence::new(sequence),
            source_url,
            recorded_date,
            pilot,
            glider_model,
            glider_id,
            length_meters,
        };
        let entity = TrackEntity::new(decode_entity_uid_typed(&entity_uid)?, body);
        Ok((header, entity))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = track)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) entity_uid: String,
    pub(crate) sequence: i64,
    pub(crate) source_url: &'a str,
    pub(crate) recorded_date: String,
    pub(crate) pilot: &'a str,
    pub(crate) glider_model: &'a str,
    pub(crate) glider_id: &'a str,
    pub(crate) length_meters: f64,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: UtcDateTimeMs, entity: &'a TrackEntity) -> Self {
        let TrackEntity { uid, body } = entity;
        let Track {
            sequence,
            source_url,
            recorded_date,
            pilot,
            glider_model,
            glider_id,
            length_meters,
        } = body;
        Self {
            row_created_ms: created_at.unix_timestamp_millis(),
            entity_uid: encode_entity_uid(uid),
            sequence: sequence.value(),
            source_url: source_url.as_str(),
            recorded_date: recorded_date.to_string(),
            pilot,
            glider_model,
            glider_id,
            length_meters: *length_meters,
        }
    }
}
