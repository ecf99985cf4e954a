// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_repo::prelude::RepoError;
use aloft_usecases_sqlite::track as uc;

use super::*;

/// Plain text
pub type ResponseBody = String;

pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    let latest = uc::load_latest_sequence(connection)?.ok_or(Error::UseCase(
        aloft_usecases_sqlite::Error::Repository(RepoError::NotFound),
    ))?;
    Ok(latest.to_string())
}
