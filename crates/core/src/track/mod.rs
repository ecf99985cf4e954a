// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, num::ParseIntError, str::FromStr};

use jiff::civil::Date;
use ::url::Url;

use crate::{prelude::*, util::url::is_http_url};

pub mod sequence;

///////////////////////////////////////////////////////////////////////
// TrackSequence
///////////////////////////////////////////////////////////////////////

pub type SequenceValue = i64;

/// Position of a track in the global ingest order.
///
/// Values are derived from the wall clock in milliseconds and
/// are strictly increasing in the order of assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackSequence(SequenceValue);

impl TrackSequence {
    /// The position before any track.
    pub const ORIGIN: Self = Self(0);

    #[must_use]
    pub const fn new(value: SequenceValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> SequenceValue {
        let Self(value) = self;
        value
    }

    #[must_use]
    pub const fn is_origin(self) -> bool {
        self.0 == Self::ORIGIN.0
    }
}

impl From<SequenceValue> for TrackSequence {
    fn from(from: SequenceValue) -> Self {
        Self::new(from)
    }
}

impl From<TrackSequence> for SequenceValue {
    fn from(from: TrackSequence) -> Self {
        from.value()
    }
}

impl fmt::Display for TrackSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TrackSequence {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

///////////////////////////////////////////////////////////////////////
// Track
///////////////////////////////////////////////////////////////////////

/// A recorded flight that has been ingested from an IGC file.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub sequence: TrackSequence,

    /// Where the IGC file has been fetched from
    pub source_url: Url,

    /// Date of the flight as declared in the header
    pub recorded_date: Date,

    pub pilot: String,

    pub glider_model: String,

    pub glider_id: String,

    /// Length of the recorded path on the surface of the earth
    pub length_meters: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackInvalidity {
    SequenceBeforeOrigin,
    SourceUrlNotHttp,
    LengthNegative,
}

impl Validate for Track {
    type Invalidity = TrackInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            sequence,
            source_url,
            length_meters,
            ..
        } = self;
        ValidationContext::new()
            .invalidate_if(
                *sequence <= TrackSequence::ORIGIN,
                TrackInvalidity::SequenceBeforeOrigin,
            )
            .invalidate_if(!is_http_url(source_url), TrackInvalidity::SourceUrlNotHttp)
            .invalidate_if(
                !(length_meters.is_finite() && *length_meters >= 0.0),
                TrackInvalidity::LengthNegative,
            )
            .into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityType;

impl crate::entity::EntityType for EntityType {}

pub type EntityUid = EntityUidTyped<EntityType>;

pub type Entity = crate::entity::Entity<EntityType, Track>;
