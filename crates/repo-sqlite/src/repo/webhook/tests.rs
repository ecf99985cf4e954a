// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use aloft_core::{TrackSequence, Webhook, WebhookEntity, WebhookUid, util::clock::UtcDateTimeMs};
use aloft_repo::{
    prelude::*,
    webhook::{EntityRepo, RecordHeader},
};

use crate::{DbConnection, prelude::tests::*};

type Records = Vec<(RecordHeader, WebhookEntity)>;

struct Fixture {
    db: DbConnection,
}

impl Fixture {
    fn new() -> TestResult<Self> {
        let db = establish_connection()?;
        Ok(Self { db })
    }
}

fn create_webhook(
    repo: &mut dyn EntityRepo,
    min_trigger_count: u32,
    last_delivered_sequence: i64,
) -> RepoResult<(RecordHeader, WebhookEntity)> {
    let entity = WebhookEntity::new(
        WebhookUid::random(),
        Webhook {
            target_url: "https://hooks.example.com/notify".parse().unwrap(),
            min_trigger_count,
            last_delivered_sequence: TrackSequence::new(last_delivered_sequence),
        },
    );
    repo.insert_webhook_entity(UtcDateTimeMs::now(), &entity)?;
    repo.load_webhook_entity_by_uid(&entity.uid)
}

#[test]
fn insert_and_load_by_uid() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let (_, entity) = create_webhook(&mut db, 2, 1000)?;
    assert_eq!(2, entity.body.min_trigger_count);
    assert_eq!(TrackSequence::new(1000), entity.body.last_delivered_sequence);
    assert!(matches!(
        db.load_webhook_entity_by_uid(&WebhookUid::random()),
        Err(RepoError::NotFound)
    ));
    Ok(())
}

#[test]
fn load_all_in_creation_order() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let (_, first) = create_webhook(&mut db, 1, 0)?;
    let (_, second) = create_webhook(&mut db, 3, 0)?;

    let mut all = Records::new();
    db.load_webhook_entities(&mut all)?;
    let uids = all.into_iter().map(|(_, entity)| entity.uid).collect::<Vec<_>>();
    assert_eq!(vec![first.uid, second.uid], uids);
    Ok(())
}

#[test]
fn purge_returns_last_state() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let (header, entity) = create_webhook(&mut db, 1, 0)?;
    assert!(db.update_webhook_last_delivered_sequence(
        header.id,
        UtcDateTimeMs::now(),
        TrackSequence::new(2000)
    )?);

    let purged = db.purge_webhook_entity_by_uid(&entity.uid)?;
    assert_eq!(entity.uid, purged.uid);
    assert_eq!(TrackSequence::new(2000), purged.body.last_delivered_sequence);

    assert!(matches!(
        db.purge_webhook_entity_by_uid(&entity.uid),
        Err(RepoError::NotFound)
    ));
    Ok(())
}

#[test]
fn cursor_never_moves_backwards() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let (header, entity) = create_webhook(&mut db, 1, 1000)?;

    assert!(db.update_webhook_last_delivered_sequence(
        header.id,
        UtcDateTimeMs::now(),
        TrackSequence::new(3000)
    )?);
    // Same position
    assert!(!db.update_webhook_last_delivered_sequence(
        header.id,
        UtcDateTimeMs::now(),
        TrackSequence::new(3000)
    )?);
    // Backwards
    assert!(!db.update_webhook_last_delivered_sequence(
        header.id,
        UtcDateTimeMs::now(),
        TrackSequence::new(2000)
    )?);

    let (_, loaded) = db.load_webhook_entity_by_uid(&entity.uid)?;
    assert_eq!(TrackSequence::new(3000), loaded.body.last_delivered_sequence);
    Ok(())
}

#[test]
fn update_cursor_of_deleted_webhook() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let (header, entity) = create_webhook(&mut db, 1, 1000)?;
    db.purge_webhook_entity_by_uid(&entity.uid)?;

    assert!(matches!(
        db.update_webhook_last_delivered_sequence(
            header.id,
            UtcDateTimeMs::now(),
            TrackSequence::new(2000)
        ),
        Err(RepoError::NotFound)
    ));
    Ok(())
}
