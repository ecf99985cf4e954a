// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{WebhookEntity, WebhookUid};
use aloft_usecases::webhook::NewWebhook;
use diesel::Connection as _;

use crate::prelude::*;

pub mod dispatch;

pub async fn create(db_gatekeeper: &Gatekeeper, new_webhook: NewWebhook) -> Result<WebhookEntity> {
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                aloft_usecases_sqlite::webhook::create(connection, new_webhook)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn load_one(db_gatekeeper: &Gatekeeper, uid: WebhookUid) -> Result<WebhookEntity> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            let connection = &mut *pooled_connection;
            aloft_usecases_sqlite::webhook::load_one(connection, &uid).map(|(_, entity)| entity)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn purge(db_gatekeeper: &Gatekeeper, uid: WebhookUid) -> Result<WebhookEntity> {
    db_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                aloft_usecases_sqlite::webhook::purge(connection, &uid)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
