// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::{Duration, Instant},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tokio::{sync::RwLock, task::spawn_blocking, time::timeout};

use super::{ConnectionPool, PooledConnection};
use crate::{Error, Result};

/// Async access to a `SQLite` connection pool.
///
/// Readers share the pool while a single writer gets exclusive access
/// to it. Both acquiring the lock and checking out a pooled connection
/// are bounded by the configured timeouts. Connections are only ever
/// checked out and used on the blocking thread pool.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: RwLock<ConnectionPool>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    pending_reads: AtomicUsize,
    pending_writes: AtomicUsize,
    decommissioned: AtomicBool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTasks {
    pub read: usize,
    pub write: usize,
}

/// Counts a task as pending until dropped.
struct PendingTask<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> PendingTask<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self { counter }
    }
}

impl Drop for PendingTask<'_> {
    fn drop(&mut self) {
        let pending_before = self.counter.fetch_sub(1, Ordering::Relaxed);
        debug_assert!(pending_before > 0);
    }
}

fn database_locked() -> Error {
    Error::TaskTimeout {
        reason: "database is locked".to_owned(),
    }
}

async fn run_with_pooled_connection<H, R>(
    connection_pool: ConnectionPool,
    deadline: Instant,
    connection_handler: H,
) -> Result<R>
where
    H: FnOnce(PooledConnection) -> R + Send + 'static,
    R: Send + 'static,
{
    spawn_blocking(move || -> Result<R> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let connection = connection_pool.get_timeout(remaining)?;
        Ok(connection_handler(connection))
    })
    .await
    .map_err(Error::TaskScheduling)?
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        Self {
            connection_pool: RwLock::new(connection_pool),
            acquire_read_timeout: Duration::from_millis(acquire_read_timeout_millis.get()),
            acquire_write_timeout: Duration::from_millis(acquire_write_timeout_millis.get()),
            pending_reads: AtomicUsize::new(0),
            pending_writes: AtomicUsize::new(0),
            decommissioned: AtomicBool::new(false),
        }
    }

    /// Reject all subsequent requests.
    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.decommissioned.load(Ordering::Acquire) {
            return Err(Error::TaskTimeout {
                reason: "connection pool has been decommissioned".to_owned(),
            });
        }
        Ok(())
    }

    /// Run a task that shares the database with other readers.
    pub async fn spawn_blocking_read_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _pending = PendingTask::enter(&self.pending_reads);
        let deadline = Instant::now() + self.acquire_read_timeout;
        let shared_pool = timeout(self.acquire_read_timeout, self.connection_pool.read())
            .await
            .map_err(|_| database_locked())?;
        self.check_not_decommissioned()?;
        log::debug!("Starting read task");
        // The lock is released after the task has finished
        run_with_pooled_connection(ConnectionPool::clone(&shared_pool), deadline, connection_handler)
            .await
    }

    /// Run a task with exclusive access to the database.
    pub async fn spawn_blocking_write_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _pending = PendingTask::enter(&self.pending_writes);
        let deadline = Instant::now() + self.acquire_write_timeout;
        let exclusive_pool = timeout(self.acquire_write_timeout, self.connection_pool.write())
            .await
            .map_err(|_| database_locked())?;
        self.check_not_decommissioned()?;
        log::debug!("Starting write task");
        run_with_pooled_connection(
            ConnectionPool::clone(&exclusive_pool),
            deadline,
            connection_handler,
        )
        .await
    }

    #[must_use]
    pub fn pending_tasks(&self) -> PendingTasks {
        PendingTasks {
            read: self.pending_reads.load(Ordering::Relaxed),
            write: self.pending_writes.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}

#[cfg(test)]
mod tests;
