// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

use aloft_core::{
    track::{Entity, EntityUid, TrackSequence},
    util::clock::UtcDateTimeMs,
};
use aloft_repo::track::*;
use diesel::dsl::{count_star, max};

use crate::{
    db::track::{models::*, schema::*},
    prelude::*,
};

fn collect_records(
    records: Vec<QueryableRecord>,
    collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
) -> RepoResult<()> {
    collector.reserve(records.len());
    for record in records {
        let (header, entity): (RecordHeader, Entity) = record.try_into()?;
        collector.collect(header, entity);
    }
    Ok(())
}

impl EntityRepo for crate::Connection<'_> {
    fn insert_track_entity(
        &mut self,
        created_at: UtcDateTimeMs,
        created_entity: &Entity,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created_entity);
        let query = diesel::insert_into(track::table)
            .values(&insertable)
            .returning(track::row_id);
        let row_id = query.get_result::<RowId>(self.as_mut()).map_err(repo_error)?;
        Ok(row_id.into())
    }

    fn load_track_entity_by_uid(&mut self, uid: &EntityUid) -> RepoResult<(RecordHeader, Entity)> {
        track::table
            .filter(track::entity_uid.eq(encode_entity_uid(uid)))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .and_then(|record| record.try_into().map_err(Into::into))
    }

    fn load_track_entities(
        &mut self,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
    ) -> RepoResult<()> {
        let records = track::table
            .order_by((track::sequence.asc(), track::row_id.asc()))
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        collect_records(records, collector)
    }

    fn load_track_entities_after(
        &mut self,
        after: Option<TrackSequence>,
        limit: Option<NonZeroU64>,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
    ) -> RepoResult<()> {
        let mut query = track::table
            .order_by((track::sequence.asc(), track::row_id.asc()))
            .into_boxed();
        if let Some(after) = after {
            query = query.filter(track::sequence.gt(after.value()));
        }
        if let Some(limit) = limit {
            query = query.limit(sql_nonzero_limit(limit));
        }
        let records = query
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        collect_records(records, collector)
    }

    fn load_latest_track_entity(&mut self) -> RepoResult<(RecordHeader, Entity)> {
        track::table
            .order_by((track::sequence.desc(), track::row_id.desc()))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .and_then(|record| record.try_into().map_err(Into::into))
    }

    fn load_latest_track_sequence(&mut self) -> RepoResult<Option<TrackSequence>> {
        track::table
            .select(max(track::sequence))
            .first::<Option<i64>>(self.as_mut())
            .map_err(repo_error)
            .map(|max_sequence| max_sequence.map(TrackSequence::new))
    }

    fn count_track_entities(&mut self) -> RepoResult<u64> {
        track::table
            .select(count_star())
            .first::<i64>(self.as_mut())
            .map_err(repo_error)
            .map(count_from_sql)
    }

    fn purge_all_track_entities(&mut self) -> RepoResult<u64> {
        let rows_affected = diesel::delete(track::table)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        log::debug!("Purged {rows_affected} track(s)");
        Ok(rows_affected as u64)
    }
}

#[cfg(test)]
mod tests;
