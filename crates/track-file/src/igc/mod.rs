// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A subset of the IGC flight recorder data format.
//!
//! Only the A record, a few H records, and the position of B records
//! are evaluated. All other records are ignored.

use aloft_core::util::geo::GeoPoint;
use jiff::civil::Date;
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while_m_n},
    character::complete::one_of,
    combinator::{map_res, verify},
};
use semval::IsValid as _;

use crate::{ParseError, ParsedTrack, Result};

const SUBJECT_DATE: &str = "DTE";
const SUBJECT_PILOT: &str = "PLT";
const SUBJECT_GLIDER_MODEL: &str = "GTY";
const SUBJECT_GLIDER_ID: &str = "GID";

/// Two-digit years before this value belong to the 21st century.
const CENTURY_PIVOT_YEAR: u32 = 80;

#[derive(Debug, Default)]
struct Headers {
    recorded_date: Option<Date>,
    pilot: Option<String>,
    glider_model: Option<String>,
    glider_id: Option<String>,
}

/// Parse the contents of an IGC file.
pub fn parse_igc(input: &str) -> Result<ParsedTrack> {
    let mut records = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());
    match records.next() {
        None => return Err(ParseError::Empty),
        Some((_, first)) if first.starts_with('A') => (),
        Some(_) => return Err(ParseError::MissingManufacturerRecord),
    }
    let mut headers = Headers::default();
    let mut points = Vec::new();
    for (line, record) in records {
        if record.starts_with('B') {
            let point = parse_fix(record).ok_or(ParseError::MalformedFix { line })?;
            points.push(point);
        } else if record.starts_with('H') {
            parse_header(line, record, &mut headers)?;
        }
    }
    let Headers {
        recorded_date,
        pilot,
        glider_model,
        glider_id,
    } = headers;
    let recorded_date = recorded_date.ok_or(ParseError::MissingDate)?;
    log::debug!(
        "Parsed IGC track from {recorded_date} with {num_points} fix(es)",
        num_points = points.len()
    );
    Ok(ParsedTrack {
        recorded_date,
        pilot: pilot.unwrap_or_default(),
        glider_model: glider_model.unwrap_or_default(),
        glider_id: glider_id.unwrap_or_default(),
        points,
    })
}

/// H records: `H` + source + three letter subject + value
fn parse_header(line: usize, record: &str, headers: &mut Headers) -> Result<()> {
    let (Some(subject), Some(remainder)) = (record.get(2..5), record.get(5..)) else {
        return Ok(());
    };
    match subject {
        SUBJECT_DATE => {
            // Either `HFDTEDDMMYY` or `HFDTEDATE:DDMMYY,NN`
            let value = remainder
                .split_once(':')
                .map_or(remainder, |(_, value)| value)
                .trim();
            let date = parse_date(value).ok_or(ParseError::InvalidDate { line })?;
            headers.recorded_date = Some(date);
        }
        SUBJECT_PILOT => headers.pilot = Some(header_text(remainder)),
        SUBJECT_GLIDER_MODEL => headers.glider_model = Some(header_text(remainder)),
        SUBJECT_GLIDER_ID => headers.glider_id = Some(header_text(remainder)),
        _ => (),
    }
    Ok(())
}

/// The free text after the optional long name, e.g. `PILOTINCHARGE:`
fn header_text(remainder: &str) -> String {
    remainder
        .split_once(':')
        .map_or(remainder, |(_, value)| value)
        .trim()
        .to_owned()
}

fn parse_date(input: &str) -> Option<Date> {
    let (_, (day, month, yy)) = ddmmyy(input).ok()?;
    let year = if yy < CENTURY_PIVOT_YEAR {
        2000 + yy
    } else {
        1900 + yy
    };
    Date::new(
        i16::try_from(year).ok()?,
        i8::try_from(month).ok()?,
        i8::try_from(day).ok()?,
    )
    .ok()
}

/// B records: `B` + `HHMMSS` + `DDMMmmm` + `N`/`S` + `DDDMMmmm` + `E`/`W` + ...
///
/// Trailing fields like the fix validity and altitudes are ignored.
fn parse_fix(record: &str) -> Option<GeoPoint> {
    let (_, point) = fix(record).ok()?;
    point.is_valid().then_some(point)
}

fn fix(input: &str) -> IResult<&str, GeoPoint> {
    let (input, (_, _, lat, lon)) = (tag("B"), time_of_day, latitude, longitude).parse(input)?;
    Ok((input, GeoPoint::from_lat_lon(lat, lon)))
}

fn ddmmyy(input: &str) -> IResult<&str, (u32, u32, u32)> {
    (digits::<2>, digits::<2>, digits::<2>).parse(input)
}

fn time_of_day(input: &str) -> IResult<&str, (u32, u32, u32)> {
    (
        verify(digits::<2>, |hour: &u32| *hour < 24),
        verify(digits::<2>, |minute: &u32| *minute < 60),
        verify(digits::<2>, |second: &u32| *second < 60),
    )
        .parse(input)
}

fn latitude(input: &str) -> IResult<&str, f64> {
    let (input, (degrees, minutes, hemisphere)) =
        (digits::<2>, minutes_milli, one_of("NS")).parse(input)?;
    let value = decimal_degrees(degrees, minutes);
    Ok((input, if hemisphere == 'S' { -value } else { value }))
}

fn longitude(input: &str) -> IResult<&str, f64> {
    let (input, (degrees, minutes, hemisphere)) =
        (digits::<3>, minutes_milli, one_of("EW")).parse(input)?;
    let value = decimal_degrees(degrees, minutes);
    Ok((input, if hemisphere == 'W' { -value } else { value }))
}

/// Minutes with 3 implied decimal places, i.e. `MMmmm`
fn minutes_milli(input: &str) -> IResult<&str, u32> {
    verify(digits::<5>, |minutes: &u32| *minutes < 60_000).parse(input)
}

fn decimal_degrees(degrees: u32, minutes_milli: u32) -> f64 {
    f64::from(degrees) + f64::from(minutes_milli) / 60_000.0
}

fn digits<const N: usize>(input: &str) -> IResult<&str, u32> {
    map_res(
        take_while_m_n(N, N, |c: char| c.is_ascii_digit()),
        str::parse::<u32>,
    )
    .parse(input)
}
