// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::prelude::*;

///////////////////////////////////////////////////////////////////////
// GeoCoord
///////////////////////////////////////////////////////////////////////

pub type GeoCoord = f64;

/// Mean radius of the earth (IUGG).
pub const MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.8;

///////////////////////////////////////////////////////////////////////
// GeoPoint
///////////////////////////////////////////////////////////////////////

/// A flat WGS 84 point without height/elevation on the surface of the
/// earth.
///
/// Both latitude and longitude are measured and stored in degrees to
/// prevent rounding errors by the conversion from/to radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: GeoCoord,

    /// Longitude in degrees
    pub lon: GeoCoord,
}

impl GeoPoint {
    pub const LAT_MIN: GeoCoord = -90.0;
    pub const LAT_MAX: GeoCoord = 90.0;
    pub const LON_MIN: GeoCoord = -180.0;
    pub const LON_MAX: GeoCoord = 180.0;

    #[must_use]
    pub const fn from_lat_lon(lat: GeoCoord, lon: GeoCoord) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance on a spherical earth (haversine formula).
    #[must_use]
    pub fn haversine_distance_meters(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = lat2 - lat1;
        let delta_lon = (other.lon - self.lon).to_radians();
        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        2.0 * MEAN_EARTH_RADIUS_METERS * a.sqrt().min(1.0).asin()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GeoPointInvalidity {
    LatitudeOutOfRange,
    LongitudeOutOfRange,
}

impl Validate for GeoPoint {
    type Invalidity = GeoPointInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !(Self::LAT_MIN..=Self::LAT_MAX).contains(&self.lat),
                GeoPointInvalidity::LatitudeOutOfRange,
            )
            .invalidate_if(
                !(Self::LON_MIN..=Self::LON_MAX).contains(&self.lon),
                GeoPointInvalidity::LongitudeOutOfRange,
            )
            .into()
    }
}

/// Sum of the distances between consecutive points.
///
/// Paths with less than two points have a length of 0.
#[must_use]
pub fn path_length_meters(path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|segment| segment[0].haversine_distance_meters(&segment[1]))
        .sum()
}
