// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    time::{Duration, Instant},
};

use aloft_core::{
    prelude::*,
    track::{Entity, EntityUid, Track, TrackSequence},
    util::clock::UtcDateTimeMs,
};
use aloft_repo::{
    prelude::*,
    track::{EntityRepo, RecordHeader, RecordId},
};
use aloft_track_file::ParsedTrack;
use url::Url;

use crate::{Error, Result};

pub mod ingest;

/// Build a new track entity from the contents of a parsed track file.
pub fn create_entity(
    sequence: TrackSequence,
    source_url: Url,
    parsed_track: ParsedTrack,
) -> Result<Entity> {
    let length_meters = parsed_track.length_meters();
    let ParsedTrack {
        recorded_date,
        pilot,
        glider_model,
        glider_id,
        points: _,
    } = parsed_track;
    let track = Track {
        sequence,
        source_url,
        recorded_date,
        pilot,
        glider_model,
        glider_id,
        length_meters,
    };
    if let Err(err) = track.validate() {
        return Err(anyhow::anyhow!("invalid track: {err:?}").into());
    }
    Ok(Entity::new(EntityUid::random(), track))
}

pub fn store_created_entity(repo: &mut impl EntityRepo, entity: &Entity) -> Result<RecordId> {
    let created_at = UtcDateTimeMs::now();
    repo.insert_track_entity(created_at, entity)
        .map_err(Into::into)
}

pub fn load_one(repo: &mut impl EntityRepo, uid: &EntityUid) -> Result<(RecordHeader, Entity)> {
    repo.load_track_entity_by_uid(uid).map_err(Into::into)
}

pub fn load_latest(repo: &mut impl EntityRepo) -> Result<(RecordHeader, Entity)> {
    repo.load_latest_track_entity().map_err(Into::into)
}

pub fn load_all(
    repo: &mut impl EntityRepo,
    collector: &mut impl ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
) -> Result<()> {
    repo.load_track_entities(collector).map_err(Into::into)
}

pub fn count(repo: &mut impl EntityRepo) -> Result<u64> {
    repo.count_track_entities().map_err(Into::into)
}

pub fn purge_all(repo: &mut impl EntityRepo) -> Result<u64> {
    let purged = repo.purge_all_track_entities()?;
    log::info!("Purged {purged} track(s)");
    Ok(purged)
}

/// A page of consecutive tracks in ingest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerPage {
    /// The sequence of the most recent track in the store
    pub latest: TrackSequence,

    /// The sequence of the first track on this page
    pub start: Option<TrackSequence>,

    /// The sequence of the last track on this page
    pub stop: Option<TrackSequence>,

    pub tracks: Vec<EntityUid>,

    pub processing: Duration,
}

/// Load the page of tracks that directly follows `after`.
///
/// Starts with the oldest track if `after` is `None`. Fails with
/// [`RepoError::NotFound`] if the store is empty.
pub fn load_ticker_page(
    repo: &mut impl EntityRepo,
    after: Option<TrackSequence>,
    page_size: NonZeroU64,
) -> Result<TickerPage> {
    let started = Instant::now();
    let latest = repo
        .load_latest_track_sequence()?
        .ok_or(Error::Repository(RepoError::NotFound))?;
    let mut records = Vec::<(RecordHeader, Entity)>::with_capacity(
        usize::try_from(page_size.get()).unwrap_or_default(),
    );
    repo.load_track_entities_after(after, Some(page_size), &mut records)?;
    let start = records.first().map(|(_, entity)| entity.body.sequence);
    let stop = records.last().map(|(_, entity)| entity.body.sequence);
    let tracks = records.into_iter().map(|(_, entity)| entity.uid).collect();
    Ok(TickerPage {
        latest,
        start,
        stop,
        tracks,
        processing: started.elapsed(),
    })
}
