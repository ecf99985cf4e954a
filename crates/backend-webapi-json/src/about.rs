// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use jiff::{Timestamp, Unit, ZonedDifference, tz::TimeZone};

use super::*;

pub const SERVICE_INFO: &str = "Service for Paragliding tracks.";

pub const API_VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// ISO 8601 duration
    pub uptime: String,
    pub info: String,
    pub version: String,
}

/// Calendar duration between two instants, from years down to seconds.
pub fn format_uptime(started: Timestamp, now: Timestamp) -> Result<String> {
    let started = started.to_zoned(TimeZone::UTC);
    let now = now.to_zoned(TimeZone::UTC);
    let uptime = started
        .until(
            ZonedDifference::new(&now)
                .largest(Unit::Year)
                .smallest(Unit::Second),
        )
        .map_err(anyhow::Error::from)?;
    Ok(uptime.to_string())
}

pub fn handle_request(started: Timestamp) -> Result<ResponseBody> {
    let uptime = format_uptime(started, Timestamp::now())?;
    Ok(ResponseBody {
        uptime,
        info: SERVICE_INFO.to_owned(),
        version: API_VERSION.to_owned(),
    })
}
