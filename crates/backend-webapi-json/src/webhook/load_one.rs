// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_usecases_sqlite::webhook as uc;

use super::*;

pub type ResponseBody = Webhook;

pub fn handle_request(connection: &mut DbConnection, uid: &WebhookUid) -> Result<ResponseBody> {
    uc::load_one(connection, uid)
        .map(|(_, entity)| export_webhook_entity(entity))
        .map_err(Into::into)
}
