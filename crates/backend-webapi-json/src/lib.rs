// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_repo_sqlite::DbConnection;
use aloft_usecases_sqlite as uc;
use diesel::Connection as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod about;
pub mod ticker;
pub mod track;
pub mod webhook;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error(transparent)]
    UseCase(uc::Error),

    #[error(transparent)]
    DatabaseTransaction(#[from] diesel::result::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        Self::UseCase(err)
    }
}

impl From<aloft_usecases::Error> for Error {
    fn from(err: aloft_usecases::Error) -> Self {
        uc::Error::from(err).into()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Identifies a newly created entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEntity {
    pub id: String,
}

impl CreatedEntity {
    #[must_use]
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}
