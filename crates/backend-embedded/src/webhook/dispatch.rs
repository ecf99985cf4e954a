// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future::Future, result::Result as StdResult, time::Instant};

use aloft_usecases::webhook::dispatch::{
    CursorAdvancePolicy, DispatchOutcome, DispatchRound, Evaluation, Notification,
};
use diesel::Connection as _;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::prelude::*;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("unexpected response status {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub trait SendNotification {
    fn send_notification(
        &self,
        target_url: &Url,
        notification: &Notification,
    ) -> impl Future<Output = StdResult<(), DeliveryError>> + Send;
}

#[derive(Debug, Serialize)]
struct NotificationBody<'a> {
    content: &'a str,
}

/// Posts notifications as JSON.
#[derive(Debug, Clone)]
pub struct HttpNotificationSender {
    client: Client,
}

impl HttpNotificationSender {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl SendNotification for HttpNotificationSender {
    async fn send_notification(
        &self,
        target_url: &Url,
        notification: &Notification,
    ) -> StdResult<(), DeliveryError> {
        let content = notification.content();
        let response = self
            .client
            .post(target_url.clone())
            .json(&NotificationBody { content: &content })
            .send()
            .await?;
        let response_status = response.status();
        if !response_status.is_success() {
            return Err(DeliveryError::Status(response_status));
        }
        Ok(())
    }
}

async fn prepare_round(db_gatekeeper: &Gatekeeper) -> Result<DispatchRound> {
    db_gatekeeper
        .spawn_blocking_read_task(move |mut pooled_connection| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                aloft_usecases_sqlite::webhook::prepare_dispatch_round(connection)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

/// Evaluate all subscriptions and deliver the notifications that are due.
///
/// Subscriptions are processed one after another. The database is
/// not accessed while a notification is delivered. Failures are
/// logged and only affect the corresponding subscription.
///
/// Fails with [`aloft_repo::prelude::RepoError::NotFound`] if no
/// tracks exist.
pub async fn dispatch_round<S>(
    db_gatekeeper: &Gatekeeper,
    sender: &S,
    cursor_advance_policy: CursorAdvancePolicy,
) -> Result<DispatchOutcome>
where
    S: SendNotification + Sync,
{
    let DispatchRound {
        latest,
        subscriptions,
    } = prepare_round(db_gatekeeper).await?;
    let mut outcome = DispatchOutcome::default();
    for (header, entity) in subscriptions {
        let started = Instant::now();
        outcome.evaluated += 1;
        let webhook = entity.body;
        let target_url = webhook.target_url.clone();
        let evaluation: Result<Evaluation> = db_gatekeeper
            .spawn_blocking_read_task(move |mut pooled_connection| {
                aloft_usecases_sqlite::webhook::evaluate_subscription(
                    &mut pooled_connection,
                    &webhook,
                    latest,
                    started,
                )
            })
            .await
            .map_err(Into::into)
            .unwrap_or_else(Err);
        let notification = match evaluation {
            Ok(Evaluation::Due(notification)) => notification,
            Ok(Evaluation::Skipped { new_track_count }) => {
                log::debug!(
                    "Skipping webhook {uid} with {new_track_count} new track(s)",
                    uid = entity.uid
                );
                outcome.skipped += 1;
                continue;
            }
            Err(err) => {
                log::warn!("Failed to evaluate webhook {uid}: {err}", uid = entity.uid);
                outcome.failed_evaluations += 1;
                continue;
            }
        };
        let delivered = match sender.send_notification(&target_url, &notification).await {
            Ok(()) => {
                log::debug!(
                    "Delivered notification about {count} new track(s) to {target_url}",
                    count = notification.track_uids.len()
                );
                outcome.delivered += 1;
                true
            }
            Err(err) => {
                log::warn!("Failed to deliver notification to {target_url}: {err}");
                outcome.failed_deliveries += 1;
                false
            }
        };
        if !cursor_advance_policy.should_advance(delivered) {
            continue;
        }
        let id = header.id;
        let advanced: Result<bool> = db_gatekeeper
            .spawn_blocking_write_task(move |mut pooled_connection| {
                aloft_usecases_sqlite::webhook::advance_cursor(&mut pooled_connection, id, latest)
            })
            .await
            .map_err(Into::into)
            .unwrap_or_else(Err);
        match advanced {
            Ok(true) => (),
            Ok(false) => {
                log::debug!(
                    "Cursor of webhook {uid} is already at or beyond {latest}",
                    uid = entity.uid
                );
            }
            Err(err) => {
                log::warn!(
                    "Failed to advance cursor of webhook {uid}: {err}",
                    uid = entity.uid
                );
                outcome.failed_evaluations += 1;
            }
        }
    }
    log::info!("Finished dispatch round up to {latest}: {outcome}");
    Ok(outcome)
}
