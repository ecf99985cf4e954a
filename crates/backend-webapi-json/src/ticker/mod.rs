// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

use aloft_core::{TrackSequence, track::SequenceValue};
use aloft_usecases::track::TickerPage as TickerPageInner;

use super::*;

pub mod load_latest;
pub mod load_page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerPage {
    pub t_latest: SequenceValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_start: Option<SequenceValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_stop: Option<SequenceValue>,

    pub tracks: Vec<String>,

    /// In milliseconds
    pub processing: u64,
}

impl From<TickerPageInner> for TickerPage {
    fn from(from: TickerPageInner) -> Self {
        let TickerPageInner {
            latest,
            start,
            stop,
            tracks,
            processing,
        } = from;
        Self {
            t_latest: latest.value(),
            t_start: start.map(TrackSequence::value),
            t_stop: stop.map(TrackSequence::value),
            tracks: tracks.iter().map(ToString::to_string).collect(),
            processing: u64::try_from(processing.as_millis()).unwrap_or(u64::MAX),
        }
    }
}
