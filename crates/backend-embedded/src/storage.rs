// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_storage_sqlite::connection::{
    Config as ConnectionConfig,
    pool::{create_connection_pool, gatekeeper::Gatekeeper, get_pooled_connection},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection: ConnectionConfig,
    pub migrate_schema: bool,
}

pub fn commission_database(config: &DatabaseConfig) -> anyhow::Result<Gatekeeper> {
    // The maximum size of the pool defines the maximum number of
    // allowed readers while writers require exclusive access.
    log::info!(
        "Creating SQLite connection pool of max. size {max_size} for {storage}",
        max_size = config.connection.pool.max_size,
        storage = config.connection.storage,
    );
    let connection_pool =
        create_connection_pool(&config.connection.storage, config.connection.pool.max_size)?;

    log::info!("Initializing database");
    aloft_usecases_sqlite::database::initialize(&mut *get_pooled_connection(&connection_pool)?)?;

    if config.migrate_schema {
        log::info!("Migrating database schema");
        aloft_usecases_sqlite::database::migrate_schema(&mut *get_pooled_connection(
            &connection_pool,
        )?)?;
    }

    let gatekeeper = Gatekeeper::new(connection_pool, config.connection.pool.gatekeeper);

    Ok(gatekeeper)
}
