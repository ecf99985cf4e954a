// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ingest paragliding tracks from IGC files and notify subscribers
//! about new tracks.
//!
//! The sub-crates are re-exported depending on the enabled features.

pub use aloft_core as core;

#[cfg(feature = "track-file")]
pub use aloft_track_file as track_file;

#[cfg(feature = "repo")]
pub use aloft_repo as repo;

#[cfg(feature = "usecases")]
pub use aloft_usecases as usecases;

#[cfg(feature = "sqlite")]
pub use aloft_repo_sqlite as repo_sqlite;

#[cfg(feature = "sqlite")]
pub use aloft_storage_sqlite as storage_sqlite;

#[cfg(feature = "sqlite")]
pub use aloft_usecases_sqlite as usecases_sqlite;

#[cfg(feature = "backend-embedded")]
pub use aloft_backend_embedded as backend_embedded;
