// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use aloft_core::{TrackEntity, TrackUid, track::SequenceValue};

use super::*;

pub mod count;
pub mod create;
pub mod load_all;
pub mod load_field;
pub mod load_one;
pub mod purge_all;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "H_date")]
    pub h_date: String,

    pub pilot: String,

    pub glider: String,

    pub glider_id: String,

    /// In meters
    pub track_length: f64,

    pub track_src_url: String,

    pub timestamp: SequenceValue,
}

impl From<aloft_core::Track> for Track {
    fn from(from: aloft_core::Track) -> Self {
        let aloft_core::Track {
            sequence,
            source_url,
            recorded_date,
            pilot,
            glider_model,
            glider_id,
            length_meters,
        } = from;
        Self {
            h_date: recorded_date.to_string(),
            pilot,
            glider: glider_model,
            glider_id,
            track_length: length_meters,
            track_src_url: source_url.into(),
            timestamp: sequence.value(),
        }
    }
}

/// A single field of [`Track`] that is addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    HDate,
    Pilot,
    Glider,
    GliderId,
    TrackLength,
    TrackSrcUrl,
}

impl TrackField {
    pub const ALL: [Self; 6] = [
        Self::HDate,
        Self::Pilot,
        Self::Glider,
        Self::GliderId,
        Self::TrackLength,
        Self::TrackSrcUrl,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HDate => "H_date",
            Self::Pilot => "pilot",
            Self::Glider => "glider",
            Self::GliderId => "glider_id",
            Self::TrackLength => "track_length",
            Self::TrackSrcUrl => "track_src_url",
        }
    }

    /// Plain text representation of the field's value.
    #[must_use]
    pub fn text_of(self, track: &Track) -> String {
        match self {
            Self::HDate => track.h_date.clone(),
            Self::Pilot => track.pilot.clone(),
            Self::Glider => track.glider.clone(),
            Self::GliderId => track.glider_id.clone(),
            Self::TrackLength => track.track_length.to_string(),
            Self::TrackSrcUrl => track.track_src_url.clone(),
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown track field: {0}")]
pub struct UnknownTrackField(String);

impl FromStr for TrackField {
    type Err = UnknownTrackField;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownTrackField(s.to_owned()))
    }
}

fn export_track_uid(uid: TrackUid) -> String {
    uid.to_string()
}

fn export_track_entity(entity: TrackEntity) -> Track {
    entity.body.into()
}
