// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_usecases_sqlite::track as uc;

use super::*;

/// Number of deleted tracks
pub type ResponseBody = u64;

pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    connection
        .transaction::<_, Error, _>(|connection| uc::purge_all(connection).map_err(Into::into))
}
