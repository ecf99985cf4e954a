// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_usecases_sqlite::track as uc;

use super::*;

pub type ResponseBody = Track;

pub fn handle_request(connection: &mut DbConnection, uid: &TrackUid) -> Result<ResponseBody> {
    uc::load_one(connection, uid)
        .map(|(_, entity)| export_track_entity(entity))
        .map_err(Into::into)
}
