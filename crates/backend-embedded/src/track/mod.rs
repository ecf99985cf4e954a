// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

use aloft_core::{Sequencer, TrackEntity, TrackSequence, TrackUid};
use aloft_repo::track::RecordHeader;
use aloft_usecases::track::TickerPage;
use diesel::Connection as _;

use crate::prelude::*;

pub mod ingest;

/// Continue issuing sequence numbers after the latest stored track.
pub async fn resume_sequencer(db_gatekeeper: &Gatekeeper) -> Result<Sequencer> {
    let latest = load_latest_sequence(db_gatekeeper).await?;
    let sequencer = if let Some(latest) = latest {
        log::info!("Resuming sequence after {latest}");
        Sequencer::resume_after(latest)
    } else {
        Sequencer::new()
    };
    Ok(sequencer)
}

pub async fn load_one(db_gatekeeper: &Gatekeeper, uid: TrackUid) -> Result<TrackEntity> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            aloft_usecases_sqlite::track::load_one(&mut pooled_connection, &uid)
                .map(|(_, entity)| entity)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn load_latest(db_gatekeeper: &Gatekeeper) -> Result<TrackEntity> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            aloft_usecases_sqlite::track::load_latest(&mut pooled_connection)
                .map(|(_, entity)| entity)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn load_latest_sequence(db_gatekeeper: &Gatekeeper) -> Result<Option<TrackSequence>> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            aloft_usecases_sqlite::track::load_latest_sequence(&mut pooled_connection)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

/// Load all tracks in ingest order.
pub async fn load_all(db_gatekeeper: &Gatekeeper) -> Result<Vec<TrackEntity>> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            let mut records = Vec::<(RecordHeader, TrackEntity)>::new();
            aloft_usecases_sqlite::track::load_all(&mut pooled_connection, &mut records)?;
            Ok(records.into_iter().map(|(_, entity)| entity).collect())
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn load_ticker_page(
    db_gatekeeper: &Gatekeeper,
    after: Option<TrackSequence>,
    page_size: NonZeroU64,
) -> Result<TickerPage> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                aloft_usecases_sqlite::track::load_ticker_page(connection, after, page_size)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn count(db_gatekeeper: &Gatekeeper) -> Result<u64> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            aloft_usecases_sqlite::track::count(&mut pooled_connection)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn purge_all(db_gatekeeper: &Gatekeeper) -> Result<u64> {
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection| {
            aloft_usecases_sqlite::track::purge_all(&mut pooled_connection)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
