// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{num::NonZeroU32, thread};

use diesel::{RunQueryDsl as _, sql_query};
use tokio::sync::oneshot;

use super::*;
use crate::connection::{Storage, pool::create_connection_pool};

fn new_gatekeeper(acquire_timeout_millis: u64) -> Gatekeeper {
    let pool = create_connection_pool(&Storage::InMemory, NonZeroU32::MIN).unwrap();
    let acquire_timeout_millis = NonZeroU64::new(acquire_timeout_millis).unwrap();
    Gatekeeper::new(
        pool,
        Config {
            acquire_read_timeout_millis: acquire_timeout_millis,
            acquire_write_timeout_millis: acquire_timeout_millis,
        },
    )
}

#[test_log::test(tokio::test)]
async fn in_memory_database_survives_between_tasks() {
    let gatekeeper = new_gatekeeper(1_000);
    gatekeeper
        .spawn_blocking_write_task(|mut connection| {
            sql_query("CREATE TABLE sample (value INTEGER NOT NULL)").execute(&mut *connection)?;
            sql_query("INSERT INTO sample (value) VALUES (42)").execute(&mut *connection)
        })
        .await
        .unwrap()
        .unwrap();
    let deleted = gatekeeper
        .spawn_blocking_read_task(|mut connection| {
            sql_query("DELETE FROM sample").execute(&mut *connection)
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(1, deleted);
    assert_eq!(
        PendingTasks { read: 0, write: 0 },
        gatekeeper.pending_tasks()
    );
}

#[test_log::test(tokio::test)]
async fn reject_tasks_after_decommissioning() {
    let gatekeeper = new_gatekeeper(1_000);
    assert_eq!(1, gatekeeper.spawn_blocking_read_task(|_| 1).await.unwrap());
    gatekeeper.decommission();
    assert!(matches!(
        gatekeeper.spawn_blocking_read_task(|_| 1).await,
        Err(Error::TaskTimeout { .. })
    ));
    assert!(matches!(
        gatekeeper.spawn_blocking_write_task(|_| 1).await,
        Err(Error::TaskTimeout { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn readers_time_out_while_writing() {
    let gatekeeper = new_gatekeeper(50);
    let (started_tx, started_rx) = oneshot::channel();
    let write = gatekeeper.spawn_blocking_write_task(move |_connection| {
        started_tx.send(()).unwrap();
        thread::sleep(Duration::from_millis(500));
    });
    let read = async {
        started_rx.await.unwrap();
        let pending = gatekeeper.pending_tasks();
        assert_eq!(1, pending.write);
        gatekeeper.spawn_blocking_read_task(|_connection| ()).await
    };
    let (write, read) = tokio::join!(write, read);
    assert!(write.is_ok());
    assert!(matches!(read, Err(Error::TaskTimeout { .. })));
}

#[test_log::test(tokio::test)]
async fn checking_out_a_connection_is_bounded_by_the_acquire_timeout() {
    // Both readers share the lock but the in-memory pool only has a single connection
    let gatekeeper = new_gatekeeper(100);
    let (started_tx, started_rx) = oneshot::channel();
    let first = gatekeeper.spawn_blocking_read_task(move |_connection| {
        started_tx.send(()).unwrap();
        thread::sleep(Duration::from_millis(1_000));
    });
    let second = async {
        started_rx.await.unwrap();
        let started_at = Instant::now();
        let result = gatekeeper.spawn_blocking_read_task(|_connection| ()).await;
        (result, started_at.elapsed())
    };
    let (first, (second, elapsed)) = tokio::join!(first, second);
    assert!(first.is_ok());
    assert!(matches!(second, Err(Error::DatabaseConnectionPool(_))));
    assert!(elapsed < Duration::from_millis(1_000));
}
