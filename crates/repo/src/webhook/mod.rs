// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{
    track::TrackSequence,
    util::clock::UtcDateTimeMs,
    webhook::{Entity, EntityUid},
};

use crate::prelude::*;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

pub trait EntityRepo {
    fn insert_webhook_entity(
        &mut self,
        created_at: UtcDateTimeMs,
        created_entity: &Entity,
    ) -> RepoResult<RecordId>;

    fn load_webhook_entity_by_uid(
        &mut self,
        uid: &EntityUid,
    ) -> RepoResult<(RecordHeader, Entity)>;

    /// Load all subscriptions in the order of their creation.
    fn load_webhook_entities(
        &mut self,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
    ) -> RepoResult<()>;

    /// Delete a subscription and return its last state.
    fn purge_webhook_entity_by_uid(&mut self, uid: &EntityUid) -> RepoResult<Entity>;

    /// Move the delivery cursor forward.
    ///
    /// Returns `false` without modifying the record if the cursor
    /// is already at or beyond `last_delivered_sequence`.
    fn update_webhook_last_delivered_sequence(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeMs,
        last_delivered_sequence: TrackSequence,
    ) -> RepoResult<bool>;
}
