// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_repo::track::RecordHeader;
use aloft_usecases_sqlite::track as uc;

use super::*;

/// Identifiers of all tracks in ingest order.
pub type ResponseBody = Vec<String>;

pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    let mut records = Vec::<(RecordHeader, TrackEntity)>::new();
    uc::load_all(connection, &mut records)?;
    Ok(records
        .into_iter()
        .map(|(_, entity)| export_track_uid(entity.uid))
        .collect())
}
