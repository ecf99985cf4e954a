// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use diesel::{Connection as _, r2d2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Storage;
use crate::Result;

pub type ConnectionManager = r2d2::ConnectionManager<diesel::SqliteConnection>;

pub type ConnectionPool = r2d2::Pool<ConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[cfg(feature = "tokio")]
pub mod gatekeeper;

pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let connection = storage.connection_str();
    // Fail early on inaccessible files. r2d2 would keep retrying.
    // Missing database files are created by this connection.
    drop(diesel::SqliteConnection::establish(&connection)?);
    let manager = ConnectionManager::new(connection);
    let builder = ConnectionPool::builder();
    let builder = if storage.is_in_memory() {
        // Every in-memory connection opens a separate, empty database.
        // The single connection must be kept alive for the whole lifetime
        // of the pool.
        if max_size.get() > 1 {
            log::warn!(
                "Limiting the connection pool size for an in-memory database from {max_size} to 1"
            );
        }
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder.max_size(max_size.get())
    };
    let pool = builder.build(manager)?;
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub max_size: NonZeroU32,

    #[cfg(feature = "tokio")]
    pub gatekeeper: self::gatekeeper::Config,
}
