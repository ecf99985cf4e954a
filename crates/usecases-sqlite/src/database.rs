// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_repo_sqlite::{initialize_database, run_migrations};

use crate::{DbConnection, Error, Result};

pub fn initialize(connection: &mut DbConnection) -> Result<()> {
    initialize_database(connection).map_err(Into::into)
}

pub fn migrate_schema(connection: &mut DbConnection) -> Result<()> {
    for migration_version in run_migrations(connection)
        .map_err(|err| anyhow::anyhow!(err))
        .map_err(Error::DatabaseMigration)?
    {
        log::info!("Applied migration '{migration_version}'");
    }
    Ok(())
}
