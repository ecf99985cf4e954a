// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{borrow::Cow, fmt, path::PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod pool;

/// Location of the `SQLite` database.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Storage {
    /// Volatile, private database that vanishes with the process.
    InMemory,
    File { path: PathBuf },
}

impl Storage {
    pub const IN_MEMORY_STR: &'static str = ":memory:";

    /// Parse a connection string, e.g. the value of `DATABASE_URL`.
    ///
    /// An empty string or `:memory:` denote an in-memory database. An
    /// optional `sqlite://` or `file:` prefix is stripped from file paths.
    #[must_use]
    pub fn parse(connection: &str) -> Self {
        let connection = connection.trim();
        if connection.is_empty() || connection == Self::IN_MEMORY_STR {
            return Self::InMemory;
        }
        let path = connection
            .strip_prefix("sqlite://")
            .or_else(|| connection.strip_prefix("file:"))
            .unwrap_or(connection);
        Self::File { path: path.into() }
    }

    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory)
    }

    /// The connection string as expected by `SQLite`.
    #[must_use]
    pub fn connection_str(&self) -> Cow<'_, str> {
        match self {
            Self::InMemory => Cow::Borrowed(Self::IN_MEMORY_STR),
            Self::File { path } => path.to_string_lossy(),
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.connection_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub storage: Storage,
    pub pool: pool::Config,
}
