// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

use test_log::test;

use aloft_core::{Track, TrackEntity, TrackSequence, TrackUid, util::clock::UtcDateTimeMs};
use aloft_repo::{
    prelude::*,
    track::{EntityRepo, RecordHeader},
};

use crate::{DbConnection, prelude::tests::*};

type Records = Vec<(RecordHeader, TrackEntity)>;

struct Fixture {
    db: DbConnection,
}

impl Fixture {
    fn new() -> TestResult<Self> {
        let db = establish_connection()?;
        Ok(Self { db })
    }
}

fn new_track(sequence: i64) -> Track {
    Track {
        sequence: TrackSequence::new(sequence),
        source_url: format!("https://example.com/tracks/{sequence}.igc")
            .parse()
            .unwrap(),
        recorded_date: jiff::civil::date(2018, 7, 2),
        pilot: "Miguel Angel Gordillo".to_owned(),
        glider_model: "RV8".to_owned(),
        glider_id: "EC-XLL".to_owned(),
        length_meters: 1234.5,
    }
}

fn create_track(repo: &mut dyn EntityRepo, sequence: i64) -> RepoResult<TrackEntity> {
    let entity = TrackEntity::new(TrackUid::random(), new_track(sequence));
    repo.insert_track_entity(UtcDateTimeMs::now(), &entity)
        .and(Ok(entity))
}

fn sequences_of(records: &[(RecordHeader, TrackEntity)]) -> Vec<i64> {
    records
        .iter()
        .map(|(_, entity)| entity.body.sequence.value())
        .collect()
}

#[test]
fn insert_and_load_by_uid() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let entity = create_track(&mut db, 1000)?;
    let (header, loaded) = db.load_track_entity_by_uid(&entity.uid)?;
    assert_eq!(entity, loaded);
    assert_eq!(header.created_at, header.updated_at);
    Ok(())
}

#[test]
fn load_by_unknown_uid_is_not_found() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    create_track(&mut db, 1000)?;
    assert!(matches!(
        db.load_track_entity_by_uid(&TrackUid::random()),
        Err(RepoError::NotFound)
    ));
    Ok(())
}

#[test]
fn reject_duplicate_sequence() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    create_track(&mut db, 1000)?;
    assert!(matches!(
        create_track(&mut db, 1000),
        Err(RepoError::Conflict)
    ));
    assert_eq!(1, db.count_track_entities()?);
    Ok(())
}

#[test]
fn load_all_ordered_by_sequence() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    // Insertion order differs from sequence order
    for sequence in [3000, 1000, 2000] {
        create_track(&mut db, sequence)?;
    }

    let mut all = Records::new();
    db.load_track_entities(&mut all)?;
    assert_eq!(vec![1000, 2000, 3000], sequences_of(&all));

    // Reading twice without writes in between yields the same result
    let mut again = Records::new();
    db.load_track_entities(&mut again)?;
    assert_eq!(all, again);
    Ok(())
}

#[test]
fn latest_track_and_sequence() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert!(matches!(
        db.load_latest_track_entity(),
        Err(RepoError::NotFound)
    ));
    assert_eq!(None, db.load_latest_track_sequence()?);

    create_track(&mut db, 2000)?;
    let latest = create_track(&mut db, 3000)?;
    create_track(&mut db, 1000)?;

    assert_eq!(latest, db.load_latest_track_entity()?.1);
    assert_eq!(
        Some(TrackSequence::new(3000)),
        db.load_latest_track_sequence()?
    );
    Ok(())
}

#[test]
fn load_after_cursor() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    for sequence in [1000, 2000, 3000, 4000, 5000] {
        create_track(&mut db, sequence)?;
    }

    let mut oldest = Records::new();
    db.load_oldest_track_entities(NonZeroU64::new(2), &mut oldest)?;
    assert_eq!(vec![1000, 2000], sequences_of(&oldest));

    let mut after = Records::new();
    db.load_track_entities_after(Some(TrackSequence::new(2000)), NonZeroU64::new(2), &mut after)?;
    assert_eq!(vec![3000, 4000], sequences_of(&after));

    // Reading the same range again without writes in between yields the same records
    let mut again = Records::new();
    db.load_track_entities_after(Some(TrackSequence::new(2000)), NonZeroU64::new(2), &mut again)?;
    assert_eq!(after, again);

    // The cursor itself is excluded, even if it doesn't match any track
    let mut after = Records::new();
    db.load_track_entities_after(Some(TrackSequence::new(2500)), None, &mut after)?;
    assert_eq!(vec![3000, 4000, 5000], sequences_of(&after));

    // Past the end
    let mut after = Records::new();
    db.load_track_entities_after(Some(TrackSequence::new(5000)), None, &mut after)?;
    assert!(after.is_empty());
    Ok(())
}

#[test]
fn paging_with_cursor_visits_every_track_once() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let expected = (1..=12).map(|i| i * 1000).collect::<Vec<_>>();
    for sequence in &expected {
        create_track(&mut db, *sequence)?;
    }

    let page_size = NonZeroU64::new(5);
    let mut visited = Vec::new();
    let mut cursor = None;
    loop {
        let mut page = Records::new();
        db.load_track_entities_after(cursor, page_size, &mut page)?;
        let Some((_, last)) = page.last() else {
            break;
        };
        cursor = Some(last.body.sequence);
        visited.extend(sequences_of(&page));
    }
    assert_eq!(expected, visited);
    Ok(())
}

#[test]
fn count_and_purge_all() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert_eq!(0, db.count_track_entities()?);
    assert_eq!(0, db.purge_all_track_entities()?);

    for sequence in [1000, 2000, 3000] {
        create_track(&mut db, sequence)?;
    }
    assert_eq!(3, db.count_track_entities()?);

    assert_eq!(3, db.purge_all_track_entities()?);
    assert_eq!(0, db.count_track_entities()?);
    assert!(matches!(
        db.load_latest_track_entity(),
        Err(RepoError::NotFound)
    ));

    // Sequences keep increasing after purging
    create_track(&mut db, 4000)?;
    assert_eq!(1, db.count_track_entities()?);
    Ok(())
}
