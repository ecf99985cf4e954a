// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::{
    QueryResult,
    connection::SimpleConnection as _,
    migration::{MigrationVersion, Result as MigrationResult},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness as _, embed_migrations};

pub type DbBackend = diesel::sqlite::Sqlite;
pub type DbConnection = diesel::sqlite::SqliteConnection;

pub mod prelude {
    pub(crate) use aloft_repo::prelude::*;
    pub(crate) use diesel::{prelude::*, result::Error as DieselError};

    pub(crate) use crate::util::{entity::*, *};
    pub use crate::{DbBackend, DbConnection};

    /// Repository access through a borrowed database connection.
    #[allow(missing_debug_implementations)]
    pub struct Connection<'db>(&'db mut DbConnection);

    impl<'db> Connection<'db> {
        pub const fn new(inner: &'db mut DbConnection) -> Self {
            Self(inner)
        }
    }

    impl AsMut<DbConnection> for Connection<'_> {
        fn as_mut(&mut self) -> &mut DbConnection {
            self.0
        }
    }

    pub(crate) fn repo_error(err: DieselError) -> RepoError {
        use diesel::result::DatabaseErrorKind;
        match err {
            DieselError::NotFound => RepoError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                RepoError::Conflict
            }
            err => anyhow::Error::from(err).into(),
        }
    }

    pub(crate) use aloft_repo::RecordId as RowId;

}

pub mod repo;

mod db;
mod util;

use self::prelude::Connection;

/// Prepare a connection before any tracks or webhooks are accessed.
///
/// Write-ahead logging lets readers proceed while a track is stored.
/// The text encoding only takes effect for a newly created database.
pub fn initialize_database(connection: &mut DbConnection) -> QueryResult<()> {
    connection.batch_execute(
        r"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA encoding = 'UTF-8';
",
    )
}

const EMBEDDED_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn run_migrations(connection: &mut DbConnection) -> MigrationResult<Vec<MigrationVersion<'_>>> {
    connection.run_pending_migrations(EMBEDDED_MIGRATIONS)
}
