// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{
    track::TrackSequence,
    util::clock::UtcDateTimeMs,
    webhook::{Entity, EntityUid},
};
use aloft_repo::webhook::*;

use crate::{
    db::webhook::{models::*, schema::*},
    prelude::*,
};

impl EntityRepo for crate::Connection<'_> {
    fn insert_webhook_entity(
        &mut self,
        created_at: UtcDateTimeMs,
        created_entity: &Entity,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created_entity);
        let query = diesel::insert_into(webhook::table)
            .values(&insertable)
            .returning(webhook::row_id);
        let row_id = query.get_result::<RowId>(self.as_mut()).map_err(repo_error)?;
        Ok(row_id.into())
    }

    fn load_webhook_entity_by_uid(
        &mut self,
        uid: &EntityUid,
    ) -> RepoResult<(RecordHeader, Entity)> {
        webhook::table
            .filter(webhook::entity_uid.eq(encode_entity_uid(uid)))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .and_then(|record| record.try_into().map_err(Into::into))
    }

    fn load_webhook_entities(
        &mut self,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
    ) -> RepoResult<()> {
        let records = webhook::table
            .order_by(webhook::row_id.asc())
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        collector.reserve(records.len());
        for record in records {
            let (header, entity): (RecordHeader, Entity) = record.try_into()?;
            collector.collect(header, entity);
        }
        Ok(())
    }

    fn purge_webhook_entity_by_uid(&mut self, uid: &EntityUid) -> RepoResult<Entity> {
        let (header, entity) = self.load_webhook_entity_by_uid(uid)?;
        let target = webhook::table.filter(webhook::row_id.eq(RowId::from(header.id)));
        let rows_affected = diesel::delete(target)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(entity)
    }

    fn update_webhook_last_delivered_sequence(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeMs,
        last_delivered_sequence: TrackSequence,
    ) -> RepoResult<bool> {
        let row_id = RowId::from(id);
        let updatable = CursorUpdatableRecord::bind(updated_at, last_delivered_sequence);
        let target = webhook::table
            .filter(webhook::row_id.eq(row_id))
            .filter(webhook::last_delivered_sequence.lt(last_delivered_sequence.value()));
        let rows_affected = diesel::update(target)
            .set(&updatable)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected > 0 {
            return Ok(true);
        }
        // Either the cursor is already at or beyond the requested
        // position or the record has been deleted in the meantime
        let exists = diesel::select(diesel::dsl::exists(
            webhook::table.filter(webhook::row_id.eq(row_id)),
        ))
        .get_result::<bool>(self.as_mut())
        .map_err(repo_error)?;
        if exists {
            Ok(false)
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests;
