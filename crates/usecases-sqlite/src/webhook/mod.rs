// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Instant;

use aloft_core::{TrackSequence, Webhook, WebhookEntity, WebhookUid};
use aloft_repo::{
    prelude::*,
    webhook::{RecordHeader, RecordId},
};
use aloft_usecases::webhook::{
    self as uc, NewWebhook,
    dispatch::{self, DispatchRound, Evaluation},
};

use crate::{DbConnection, RepoConnection, Result};

/// Create and store a new subscription.
///
/// The cursor is initialized with the latest sequence. The caller
/// is responsible for running this function within a transaction.
pub fn create(connection: &mut DbConnection, new_webhook: NewWebhook) -> Result<WebhookEntity> {
    let mut repo = RepoConnection::new(connection);
    let created_entity = uc::create_entity(&mut repo, new_webhook)?;
    uc::store_created_entity(&mut repo, &created_entity)?;
    Ok(created_entity)
}

pub fn load_one(
    connection: &mut DbConnection,
    uid: &WebhookUid,
) -> Result<(RecordHeader, WebhookEntity)> {
    let mut repo = RepoConnection::new(connection);
    uc::load_one(&mut repo, uid).map_err(Into::into)
}

pub fn load_all(
    connection: &mut DbConnection,
    collector: &mut impl ReservableRecordCollector<Header = RecordHeader, Record = WebhookEntity>,
) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::load_all(&mut repo, collector).map_err(Into::into)
}

pub fn purge(connection: &mut DbConnection, uid: &WebhookUid) -> Result<WebhookEntity> {
    let mut repo = RepoConnection::new(connection);
    uc::purge(&mut repo, uid).map_err(Into::into)
}

pub fn prepare_dispatch_round(connection: &mut DbConnection) -> Result<DispatchRound> {
    let mut repo = RepoConnection::new(connection);
    dispatch::prepare_round(&mut repo).map_err(Into::into)
}

pub fn evaluate_subscription(
    connection: &mut DbConnection,
    webhook: &Webhook,
    latest: TrackSequence,
    started: Instant,
) -> Result<Evaluation> {
    let mut repo = RepoConnection::new(connection);
    dispatch::evaluate_subscription(&mut repo, webhook, latest, started).map_err(Into::into)
}

pub fn advance_cursor(
    connection: &mut DbConnection,
    id: RecordId,
    latest: TrackSequence,
) -> Result<bool> {
    let mut repo = RepoConnection::new(connection);
    dispatch::advance_cursor(&mut repo, id, latest).map_err(Into::into)
}

#[cfg(test)]
mod tests;
