// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_usecases_sqlite::webhook as uc;

use super::*;

/// The deleted subscription
pub type ResponseBody = Webhook;

pub fn handle_request(connection: &mut DbConnection, uid: &WebhookUid) -> Result<ResponseBody> {
    connection
        .transaction::<_, Error, _>(|connection| uc::purge(connection, uid).map_err(Into::into))
        .map(export_webhook_entity)
}
