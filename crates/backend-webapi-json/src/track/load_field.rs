// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

/// Plain text
pub type ResponseBody = String;

pub fn handle_request(
    connection: &mut DbConnection,
    uid: &TrackUid,
    field: TrackField,
) -> Result<ResponseBody> {
    let track = load_one::handle_request(connection, uid)?;
    Ok(field.text_of(&track))
}
