// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::TrackUid;
use aloft_track_file::ParsedTrack;
use url::Url;

use super::*;
use crate::{Error, tests::establish_connection};

fn create_track(connection: &mut DbConnection, sequence: i64) -> anyhow::Result<TrackUid> {
    let parsed_track = ParsedTrack {
        recorded_date: jiff::civil::date(2018, 7, 2),
        pilot: String::new(),
        glider_model: String::new(),
        glider_id: String::new(),
        points: vec![],
    };
    let (_, entity) = crate::track::create(
        connection,
        TrackSequence::new(sequence),
        Url::parse("http://example.com/track.igc")?,
        parsed_track,
    )?;
    Ok(entity.uid)
}

fn new_webhook(min_trigger_count: Option<u32>) -> NewWebhook {
    NewWebhook {
        target_url: "https://hooks.example.com/new_track".to_owned(),
        min_trigger_count,
    }
}

/// Evaluate the single subscription and advance its cursor if due.
fn dispatch_once(connection: &mut DbConnection) -> anyhow::Result<Evaluation> {
    let DispatchRound {
        latest,
        subscriptions,
    } = prepare_dispatch_round(connection)?;
    assert_eq!(1, subscriptions.len());
    let (header, entity) = &subscriptions[0];
    let evaluation = evaluate_subscription(connection, &entity.body, latest, Instant::now())?;
    if matches!(evaluation, Evaluation::Due(_)) {
        assert!(advance_cursor(connection, header.id, latest)?);
    }
    Ok(evaluation)
}

#[test_log::test]
fn create_without_tracks_starts_at_origin() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let entity = create(&mut connection, new_webhook(None))?;
    assert_eq!(TrackSequence::ORIGIN, entity.body.last_delivered_sequence);
    assert_eq!(
        Webhook::DEFAULT_MIN_TRIGGER_COUNT,
        entity.body.min_trigger_count
    );
    assert_eq!(entity, load_one(&mut connection, &entity.uid)?.1);
    Ok(())
}

#[test_log::test]
fn create_starts_after_latest_track() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    create_track(&mut connection, 999)?;
    create_track(&mut connection, 1000)?;
    let entity = create(&mut connection, new_webhook(Some(3)))?;
    assert_eq!(
        TrackSequence::new(1000),
        entity.body.last_delivered_sequence
    );
    assert_eq!(3, entity.body.min_trigger_count);
    Ok(())
}

#[test_log::test]
fn reject_invalid_target_url() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let res = create(
        &mut connection,
        NewWebhook {
            target_url: "not a url".to_owned(),
            min_trigger_count: None,
        },
    );
    assert!(matches!(res, Err(Error::Input(_))));
    let mut records = Vec::<(RecordHeader, WebhookEntity)>::new();
    load_all(&mut connection, &mut records)?;
    assert!(records.is_empty());
    Ok(())
}

#[test_log::test]
fn purge_returns_last_state() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    create_track(&mut connection, 1000)?;
    let created = create(&mut connection, new_webhook(Some(0)))?;
    create_track(&mut connection, 1001)?;
    assert!(matches!(dispatch_once(&mut connection)?, Evaluation::Due(_)));

    let purged = purge(&mut connection, &created.uid)?;
    assert_eq!(created.uid, purged.uid);
    assert_eq!(TrackSequence::new(1001), purged.body.last_delivered_sequence);

    assert!(matches!(
        load_one(&mut connection, &created.uid),
        Err(Error::Repository(RepoError::NotFound))
    ));
    assert!(matches!(
        purge(&mut connection, &created.uid),
        Err(Error::Repository(RepoError::NotFound))
    ));
    Ok(())
}

#[test_log::test]
fn dispatch_round_requires_tracks() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    create(&mut connection, new_webhook(None))?;
    assert!(matches!(
        prepare_dispatch_round(&mut connection),
        Err(Error::Repository(RepoError::NotFound))
    ));
    Ok(())
}

#[test_log::test]
fn trigger_after_exceeding_min_trigger_count() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    create_track(&mut connection, 1000)?;
    let created = create(&mut connection, new_webhook(Some(1)))?;
    assert_eq!(
        TrackSequence::new(1000),
        created.body.last_delivered_sequence
    );

    let first = create_track(&mut connection, 1001)?;
    assert_eq!(
        Evaluation::Skipped { new_track_count: 1 },
        dispatch_once(&mut connection)?
    );
    // Unchanged
    assert_eq!(
        TrackSequence::new(1000),
        load_one(&mut connection, &created.uid)?
            .1
            .body
            .last_delivered_sequence
    );

    let second = create_track(&mut connection, 1002)?;
    let Evaluation::Due(notification) = dispatch_once(&mut connection)? else {
        panic!("notification expected");
    };
    assert_eq!(TrackSequence::new(1002), notification.latest);
    assert_eq!(vec![first, second], notification.track_uids);
    assert_eq!(
        TrackSequence::new(1002),
        load_one(&mut connection, &created.uid)?
            .1
            .body
            .last_delivered_sequence
    );

    // Nothing new
    assert_eq!(
        Evaluation::Skipped { new_track_count: 0 },
        dispatch_once(&mut connection)?
    );
    Ok(())
}

#[test_log::test]
fn threshold_is_exclusive() -> anyhow::Result<()> {
    for min_trigger_count in 0..4 {
        let mut connection = establish_connection()?;
        create_track(&mut connection, 1)?;
        create(&mut connection, new_webhook(Some(min_trigger_count)))?;
        let mut sequence = 1;
        for _ in 0..min_trigger_count {
            sequence += 1;
            create_track(&mut connection, sequence)?;
        }
        // Exactly k new tracks
        assert!(matches!(
            dispatch_once(&mut connection)?,
            Evaluation::Skipped { .. }
        ));
        sequence += 1;
        create_track(&mut connection, sequence)?;
        // k + 1 new tracks
        let Evaluation::Due(notification) = dispatch_once(&mut connection)? else {
            panic!("notification expected for min_trigger_count = {min_trigger_count}");
        };
        assert_eq!(
            min_trigger_count as usize + 1,
            notification.track_uids.len()
        );
    }
    Ok(())
}

#[test_log::test]
fn cursor_never_moves_backwards() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    create_track(&mut connection, 1000)?;
    create(&mut connection, new_webhook(None))?;
    let (header, _) = {
        let mut records = Vec::<(RecordHeader, WebhookEntity)>::new();
        load_all(&mut connection, &mut records)?;
        records.remove(0)
    };
    assert!(!advance_cursor(&mut connection, header.id, TrackSequence::new(999))?);
    assert!(!advance_cursor(&mut connection, header.id, TrackSequence::new(1000))?);
    assert!(advance_cursor(&mut connection, header.id, TrackSequence::new(1001))?);
    Ok(())
}
