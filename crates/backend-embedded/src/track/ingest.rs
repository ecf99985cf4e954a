// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{Sequencer, TrackEntity, TrackSequence};
use aloft_track_file::ParsedTrack;
use aloft_usecases::{
    InputError,
    track::ingest::{IngestProgress, parse_track_file, validate_source_url},
    webhook::dispatch::CursorAdvancePolicy,
};
use url::Url;

use crate::{
    fetch::FetchTrackFile,
    prelude::*,
    webhook::dispatch::{SendNotification, dispatch_round},
};

/// Collaborators of the ingest pipeline.
#[allow(missing_debug_implementations)]
pub struct IngestEnvironment<'a, F, S> {
    pub db_gatekeeper: &'a Gatekeeper,
    pub sequencer: &'a Sequencer,
    pub fetcher: &'a F,
    pub sender: &'a S,
    pub cursor_advance_policy: CursorAdvancePolicy,
}

/// Ingest a track from a remote IGC file.
///
/// Subscribers are notified after the track has been stored. Failures
/// while notifying subscribers are only logged.
pub async fn ingest<F, S>(env: &IngestEnvironment<'_, F, S>, url: &str) -> Result<TrackEntity>
where
    F: FetchTrackFile + Sync,
    S: SendNotification + Sync,
{
    let source_url = validate_source_url(url)?;
    let mut progress = IngestProgress::new(source_url.clone());
    match ingest_stages(env, &mut progress, source_url).await {
        Ok(entity) => Ok(entity),
        Err(err) => {
            progress.fail(&err);
            Err(err)
        }
    }
}

async fn ingest_stages<F, S>(
    env: &IngestEnvironment<'_, F, S>,
    progress: &mut IngestProgress,
    source_url: Url,
) -> Result<TrackEntity>
where
    F: FetchTrackFile + Sync,
    S: SendNotification + Sync,
{
    let sequence = env.sequencer.next();
    progress.advance();

    let parsed_track = fetch_and_parse(env.fetcher, &source_url).await?;
    progress.advance();

    let entity = store(env.db_gatekeeper, sequence, source_url, parsed_track).await?;
    progress.advance();

    match dispatch_round(env.db_gatekeeper, env.sender, env.cursor_advance_policy).await {
        Ok(outcome) => {
            log::debug!("Notified subscribers about track {uid}: {outcome}", uid = entity.uid);
        }
        Err(err) => {
            log::warn!(
                "Failed to notify subscribers about track {uid}: {err}",
                uid = entity.uid
            );
        }
    }
    progress.advance();

    progress.advance();
    Ok(entity)
}

async fn fetch_and_parse<F>(fetcher: &F, source_url: &Url) -> Result<ParsedTrack>
where
    F: FetchTrackFile + Sync,
{
    let content = fetcher
        .fetch_track_file(source_url)
        .await
        .map_err(|err| InputError(anyhow::anyhow!("failed to fetch {source_url}: {err}")))?;
    parse_track_file(source_url, &content).map_err(Into::into)
}

async fn store(
    db_gatekeeper: &Gatekeeper,
    sequence: TrackSequence,
    source_url: Url,
    parsed_track: ParsedTrack,
) -> Result<TrackEntity> {
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection| {
            aloft_usecases_sqlite::track::create(
                &mut pooled_connection,
                sequence,
                source_url,
                parsed_track,
            )
            .map(|(_, entity)| entity)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
