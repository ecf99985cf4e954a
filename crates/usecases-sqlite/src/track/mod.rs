// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

use aloft_core::{TrackEntity, TrackSequence, TrackUid};
use aloft_repo::{
    prelude::*,
    track::{EntityRepo as _, RecordHeader, RecordId},
};
use aloft_track_file::ParsedTrack;
use aloft_usecases::track::{self as uc, TickerPage};
use url::Url;

use crate::{DbConnection, RepoConnection, Result};

/// Create and store a new track.
pub fn create(
    connection: &mut DbConnection,
    sequence: TrackSequence,
    source_url: Url,
    parsed_track: ParsedTrack,
) -> Result<(RecordId, TrackEntity)> {
    let created_entity = uc::create_entity(sequence, source_url, parsed_track)?;
    let mut repo = RepoConnection::new(connection);
    let id = uc::store_created_entity(&mut repo, &created_entity)?;
    Ok((id, created_entity))
}

pub fn load_one(
    connection: &mut DbConnection,
    uid: &TrackUid,
) -> Result<(RecordHeader, TrackEntity)> {
    let mut repo = RepoConnection::new(connection);
    uc::load_one(&mut repo, uid).map_err(Into::into)
}

pub fn load_latest(connection: &mut DbConnection) -> Result<(RecordHeader, TrackEntity)> {
    let mut repo = RepoConnection::new(connection);
    uc::load_latest(&mut repo).map_err(Into::into)
}

pub fn load_latest_sequence(connection: &mut DbConnection) -> Result<Option<TrackSequence>> {
    let mut repo = RepoConnection::new(connection);
    repo.load_latest_track_sequence().map_err(Into::into)
}

pub fn load_all(
    connection: &mut DbConnection,
    collector: &mut impl ReservableRecordCollector<Header = RecordHeader, Record = TrackEntity>,
) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::load_all(&mut repo, collector).map_err(Into::into)
}

pub fn load_ticker_page(
    connection: &mut DbConnection,
    after: Option<TrackSequence>,
    page_size: NonZeroU64,
) -> Result<TickerPage> {
    let mut repo = RepoConnection::new(connection);
    uc::load_ticker_page(&mut repo, after, page_size).map_err(Into::into)
}

pub fn count(connection: &mut DbConnection) -> Result<u64> {
    let mut repo = RepoConnection::new(connection);
    uc::count(&mut repo).map_err(Into::into)
}

pub fn purge_all(connection: &mut DbConnection) -> Result<u64> {
    let mut repo = RepoConnection::new(connection);
    uc::purge_all(&mut repo).map_err(Into::into)
}

#[cfg(test)]
mod tests;
