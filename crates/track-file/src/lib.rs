// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::util::geo::{GeoPoint, path_length_meters};
use jiff::civil::Date;
use thiserror::Error;

pub mod igc;

pub use self::igc::parse_igc;

/// Metadata and path of a recorded flight.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrack {
    pub recorded_date: Date,

    /// Empty if not declared
    pub pilot: String,

    /// Empty if not declared
    pub glider_model: String,

    /// Empty if not declared
    pub glider_id: String,

    /// Recorded positions in chronological order
    pub points: Vec<GeoPoint>,
}

impl ParsedTrack {
    #[must_use]
    pub fn length_meters(&self) -> f64 {
        path_length_meters(&self.points)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("first record is not an A record")]
    MissingManufacturerRecord,

    #[error("missing flight date (HFDTE)")]
    MissingDate,

    #[error("invalid flight date in line {line}")]
    InvalidDate { line: usize },

    #[error("malformed B record in line {line}")]
    MalformedFix { line: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;
