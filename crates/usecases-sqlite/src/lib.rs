// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_repo::prelude::RepoError;
use aloft_repo_sqlite::prelude::{Connection as RepoConnection, *};
use aloft_storage_sqlite::Error as StorageError;
use aloft_usecases as uc;
use thiserror::Error;

pub mod database;
pub mod track;
pub mod webhook;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(anyhow::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    DatabaseMigration(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error::*;
        match err {
            Input(uc::InputError(err)) => Self::Input(err),
            Repository(err) => Self::Repository(err),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<uc::InputError> for Error {
    fn from(err: uc::InputError) -> Self {
        let uc::InputError(err) = err;
        Self::Input(err)
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
