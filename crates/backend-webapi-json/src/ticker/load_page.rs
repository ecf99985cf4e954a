// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_usecases_sqlite::track as uc;

use super::*;

pub type ResponseBody = TickerPage;

/// Load the tracks that follow `after` or the very first tracks.
pub fn handle_request(
    connection: &mut DbConnection,
    after: Option<TrackSequence>,
    page_size: NonZeroU64,
) -> Result<ResponseBody> {
    connection
        .transaction::<_, Error, _>(|connection| {
            uc::load_ticker_page(connection, after, page_size).map_err(Into::into)
        })
        .map(Into::into)
}
