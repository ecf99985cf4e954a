// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

use aloft_core::{
    track::{Entity, EntityUid, TrackSequence},
    util::clock::UtcDateTimeMs,
};

use crate::prelude::*;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

/// Ordered collection of track entities.
///
/// Tracks are ordered by ascending sequence. Ties are broken by
/// ascending record id.
pub trait EntityRepo {
    fn insert_track_entity(
        &mut self,
        created_at: UtcDateTimeMs,
        created_entity: &Entity,
    ) -> RepoResult<RecordId>;

    fn load_track_entity_by_uid(&mut self, uid: &EntityUid) -> RepoResult<(RecordHeader, Entity)>;

    /// Load all tracks in order.
    fn load_track_entities(
        &mut self,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
    ) -> RepoResult<()>;

    /// Load tracks with a sequence strictly greater than `after`
    /// in order.
    ///
    /// Starts with the oldest track if `after` is `None`. Returns all
    /// remaining tracks if `limit` is `None`.
    fn load_track_entities_after(
        &mut self,
        after: Option<TrackSequence>,
        limit: Option<NonZeroU64>,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
    ) -> RepoResult<()>;

    /// The track with the greatest sequence.
    fn load_latest_track_entity(&mut self) -> RepoResult<(RecordHeader, Entity)>;

    /// The greatest sequence of all tracks or `None` if empty.
    fn load_latest_track_sequence(&mut self) -> RepoResult<Option<TrackSequence>>;

    fn count_track_entities(&mut self) -> RepoResult<u64>;

    /// Delete all tracks and return how many have been deleted.
    fn purge_all_track_entities(&mut self) -> RepoResult<u64>;

    fn load_oldest_track_entities(
        &mut self,
        limit: Option<NonZeroU64>,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
    ) -> RepoResult<()> {
        self.load_track_entities_after(None, limit, collector)
    }
}
