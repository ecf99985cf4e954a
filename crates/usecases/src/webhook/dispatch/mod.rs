// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Evaluation of subscriptions after new tracks have been ingested.
//!
//! A dispatch round consists of the following steps:
//!
//! 1. [`prepare_round`] loads the latest sequence and all subscriptions.
//! 2. [`evaluate_subscription`] decides for each subscription if a
//!    notification is due.
//! 3. The notification is delivered by the caller, outside of any
//!    database transaction.
//! 4. [`advance_cursor`] moves the cursor of the subscription to the
//!    latest sequence, depending on the [`CursorAdvancePolicy`].

use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use aloft_core::{
    track::{Entity as TrackEntity, EntityUid as TrackUid, TrackSequence},
    util::clock::UtcDateTimeMs,
    webhook::{Entity, Webhook},
};
use aloft_repo::{
    track::{EntityRepo as TrackRepo, RecordHeader as TrackRecordHeader},
    webhook::{EntityRepo, RecordHeader, RecordId},
};

use crate::Result;

/// When to move the cursor of a subscription after a notification
/// was due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorAdvancePolicy {
    /// Advance after every delivery attempt, even if it failed.
    ///
    /// Tracks are announced at most once.
    #[default]
    OnAttempt,

    /// Advance only after a successful delivery.
    ///
    /// Tracks are announced at least once.
    OnSuccess,
}

impl CursorAdvancePolicy {
    #[must_use]
    pub const fn should_advance(self, delivered: bool) -> bool {
        match self {
            Self::OnAttempt => true,
            Self::OnSuccess => delivered,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnAttempt => "attempt",
            Self::OnSuccess => "success",
        }
    }
}

impl fmt::Display for CursorAdvancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CursorAdvancePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attempt" => Ok(Self::OnAttempt),
            "success" => Ok(Self::OnSuccess),
            _ => anyhow::bail!("invalid cursor advance policy: {s}"),
        }
    }
}

/// Announces new tracks to a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The latest sequence at the start of the dispatch round
    pub latest: TrackSequence,

    /// New tracks in ascending order
    pub track_uids: Vec<TrackUid>,

    pub processing: Duration,
}

impl Notification {
    /// The human-readable summary that is sent to the subscriber.
    #[must_use]
    pub fn content(&self) -> String {
        let Self {
            latest,
            track_uids,
            processing,
        } = self;
        let count = track_uids.len();
        let track_uids = track_uids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let millis = processing.as_millis();
        format!(
            "Latest timestamp: {latest}, {count} new tracks are: {track_uids}. (processing {millis}ms)"
        )
    }
}

/// The subscriptions that are evaluated during a single dispatch round.
#[derive(Debug)]
pub struct DispatchRound {
    /// The latest sequence at the start of the round
    pub latest: TrackSequence,

    pub subscriptions: Vec<(RecordHeader, Entity)>,
}

/// Load the latest sequence and all subscriptions.
///
/// Fails with [`aloft_repo::prelude::RepoError::NotFound`] if no
/// tracks exist.
pub fn prepare_round<Repo>(repo: &mut Repo) -> Result<DispatchRound>
where
    Repo: TrackRepo + EntityRepo,
{
    let (_, latest_track) = repo.load_latest_track_entity()?;
    let latest = latest_track.body.sequence;
    let mut subscriptions = Vec::<(RecordHeader, Entity)>::new();
    repo.load_webhook_entities(&mut subscriptions)?;
    Ok(DispatchRound {
        latest,
        subscriptions,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Not enough new tracks
    Skipped { new_track_count: usize },

    /// The notification should be delivered
    Due(Notification),
}

/// Decide if a notification needs to be sent to the subscriber.
///
/// `started` is the point in time when processing of this
/// subscription began.
pub fn evaluate_subscription(
    repo: &mut impl TrackRepo,
    webhook: &Webhook,
    latest: TrackSequence,
    started: Instant,
) -> Result<Evaluation> {
    let mut new_tracks = Vec::<(TrackRecordHeader, TrackEntity)>::new();
    repo.load_track_entities_after(Some(webhook.last_delivered_sequence), None, &mut new_tracks)?;
    let new_track_count = new_tracks.len();
    if !webhook.is_triggered_by(new_track_count) {
        return Ok(Evaluation::Skipped { new_track_count });
    }
    let track_uids = new_tracks.into_iter().map(|(_, entity)| entity.uid).collect();
    Ok(Evaluation::Due(Notification {
        latest,
        track_uids,
        processing: started.elapsed(),
    }))
}

/// Move the cursor of a subscription forward.
///
/// Returns `false` if the cursor has already been at or beyond
/// `latest`.
pub fn advance_cursor(
    repo: &mut impl EntityRepo,
    id: RecordId,
    latest: TrackSequence,
) -> Result<bool> {
    let updated_at = UtcDateTimeMs::now();
    repo.update_webhook_last_delivered_sequence(id, updated_at, latest)
        .map_err(Into::into)
}

/// Summary of a dispatch round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub evaluated: usize,
    pub skipped: usize,
    pub delivered: usize,
    pub failed_deliveries: usize,
    pub failed_evaluations: usize,
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            evaluated,
            skipped,
            delivered,
            failed_deliveries,
            failed_evaluations,
        } = self;
        write!(
            f,
            "evaluated: {evaluated}, skipped: {skipped}, delivered: {delivered}, failed deliveries: {failed_deliveries}, failed evaluations: {failed_evaluations}"
        )
    }
}
