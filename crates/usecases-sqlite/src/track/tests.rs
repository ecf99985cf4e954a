// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::util::geo::GeoPoint;

use super::*;
use crate::{Error, tests::establish_connection};

type Records = Vec<(RecordHeader, TrackEntity)>;

fn parsed_track(pilot: &str) -> ParsedTrack {
    ParsedTrack {
        recorded_date: jiff::civil::date(2018, 7, 2),
        pilot: pilot.to_owned(),
        glider_model: "RV8".to_owned(),
        glider_id: "EC-XLL".to_owned(),
        points: vec![
            GeoPoint::from_lat_lon(47.0, 8.0),
            GeoPoint::from_lat_lon(47.01, 8.01),
        ],
    }
}

fn create_track(connection: &mut DbConnection, sequence: i64) -> anyhow::Result<TrackEntity> {
    let source_url = Url::parse(&format!("http://example.com/{sequence}.igc"))?;
    let (_, entity) = create(
        connection,
        TrackSequence::new(sequence),
        source_url,
        parsed_track("Pilot"),
    )?;
    Ok(entity)
}

fn page_size(value: u64) -> NonZeroU64 {
    NonZeroU64::new(value).unwrap()
}

#[test_log::test]
fn create_and_load_tracks_in_order() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;

    let a = create_track(&mut connection, 1000)?;
    assert_eq!(a, load_latest(&mut connection)?.1);

    let b = create_track(&mut connection, 1001)?;
    assert_eq!(b, load_latest(&mut connection)?.1);
    assert_eq!(2, count(&mut connection)?);
    assert_eq!(
        Some(TrackSequence::new(1001)),
        load_latest_sequence(&mut connection)?
    );
    assert_eq!(a, load_one(&mut connection, &a.uid)?.1);

    let mut records = Records::new();
    load_all(&mut connection, &mut records)?;
    let uids = records
        .into_iter()
        .map(|(_, entity)| entity.uid)
        .collect::<Vec<_>>();
    assert_eq!(vec![a.uid, b.uid], uids);

    let page = load_ticker_page(&mut connection, None, page_size(5))?;
    assert_eq!(vec![a.uid, b.uid], page.tracks);
    let page = load_ticker_page(&mut connection, Some(TrackSequence::new(1000)), page_size(5))?;
    assert_eq!(vec![b.uid], page.tracks);

    Ok(())
}

#[test_log::test]
fn length_is_stored_with_the_track() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let created = create_track(&mut connection, 1)?;
    assert!(created.body.length_meters > 1000.0);
    let (_, loaded) = load_one(&mut connection, &created.uid)?;
    assert!((created.body.length_meters - loaded.body.length_meters).abs() < 1e-6);
    Ok(())
}

#[test_log::test]
fn reject_duplicate_sequence() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    create_track(&mut connection, 1000)?;
    assert!(matches!(
        create_track(&mut connection, 1000)
            .unwrap_err()
            .downcast::<Error>()?,
        Error::Repository(RepoError::Conflict)
    ));
    assert_eq!(1, count(&mut connection)?);
    Ok(())
}

#[test_log::test]
fn load_unknown_track() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    create_track(&mut connection, 1)?;
    assert!(matches!(
        load_one(&mut connection, &TrackUid::random()),
        Err(Error::Repository(RepoError::NotFound))
    ));
    Ok(())
}

#[test_log::test]
fn ticker_pages() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    assert!(matches!(
        load_ticker_page(&mut connection, None, page_size(5)),
        Err(Error::Repository(RepoError::NotFound))
    ));

    let uids = (1..=7)
        .map(|sequence| create_track(&mut connection, sequence).map(|entity| entity.uid))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let first = load_ticker_page(&mut connection, None, page_size(5))?;
    assert_eq!(TrackSequence::new(7), first.latest);
    assert_eq!(Some(TrackSequence::new(1)), first.start);
    assert_eq!(Some(TrackSequence::new(5)), first.stop);
    assert_eq!(uids[..5], first.tracks[..]);

    let second = load_ticker_page(&mut connection, first.stop, page_size(5))?;
    assert_eq!(TrackSequence::new(7), second.latest);
    assert_eq!(Some(TrackSequence::new(6)), second.start);
    assert_eq!(Some(TrackSequence::new(7)), second.stop);
    assert_eq!(uids[5..], second.tracks[..]);

    let past_the_end = load_ticker_page(&mut connection, second.stop, page_size(5))?;
    assert_eq!(TrackSequence::new(7), past_the_end.latest);
    assert_eq!(None, past_the_end.start);
    assert_eq!(None, past_the_end.stop);
    assert!(past_the_end.tracks.is_empty());

    Ok(())
}

#[test_log::test]
fn purge_all_tracks() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    for sequence in 1..=3 {
        create_track(&mut connection, sequence)?;
    }
    assert_eq!(3, purge_all(&mut connection)?);
    assert_eq!(0, count(&mut connection)?);
    assert!(matches!(
        load_latest(&mut connection),
        Err(Error::Repository(RepoError::NotFound))
    ));
    assert_eq!(None, load_latest_sequence(&mut connection)?);
    assert_eq!(0, purge_all(&mut connection)?);
    Ok(())
}

