// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{
    prelude::*,
    track::TrackSequence,
    util::{clock::UtcDateTimeMs, url::parse_http_url},
    webhook::{Entity, EntityUid, TriggerCount, Webhook},
};
use aloft_repo::{
    prelude::*,
    track::EntityRepo as TrackRepo,
    webhook::{EntityRepo, RecordHeader, RecordId},
};

use crate::{InputError, InputResult, Result};

pub mod dispatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebhook {
    pub target_url: String,

    /// Defaults to [`Webhook::DEFAULT_MIN_TRIGGER_COUNT`]
    pub min_trigger_count: Option<TriggerCount>,
}

#[derive(Debug)]
pub struct ValidatedInput {
    target_url: url::Url,
    min_trigger_count: TriggerCount,
}

pub fn validate_input(new_webhook: NewWebhook) -> InputResult<ValidatedInput> {
    let NewWebhook {
        target_url,
        min_trigger_count,
    } = new_webhook;
    let target_url = parse_http_url(&target_url).map_err(|err| {
        InputError(anyhow::anyhow!("invalid webhook URL \"{target_url}\": {err}"))
    })?;
    Ok(ValidatedInput {
        target_url,
        min_trigger_count: min_trigger_count.unwrap_or(Webhook::DEFAULT_MIN_TRIGGER_COUNT),
    })
}

/// Create a new subscription.
///
/// Only tracks that are ingested after the subscription has been
/// created will be announced.
pub fn create_entity(repo: &mut impl TrackRepo, new_webhook: NewWebhook) -> Result<Entity> {
    let ValidatedInput {
        target_url,
        min_trigger_count,
    } = validate_input(new_webhook)?;
    let last_delivered_sequence = repo
        .load_latest_track_sequence()?
        .unwrap_or(TrackSequence::ORIGIN);
    let webhook = Webhook {
        target_url,
        min_trigger_count,
        last_delivered_sequence,
    };
    if let Err(err) = webhook.validate() {
        return Err(anyhow::anyhow!("invalid webhook: {err:?}").into());
    }
    Ok(Entity::new(EntityUid::random(), webhook))
}

pub fn store_created_entity(repo: &mut impl EntityRepo, entity: &Entity) -> Result<RecordId> {
    let created_at = UtcDateTimeMs::now();
    let id = repo.insert_webhook_entity(created_at, entity)?;
    log::info!(
        "Registered webhook {uid} for {target_url}",
        uid = entity.uid,
        target_url = entity.body.target_url,
    );
    Ok(id)
}

pub fn load_one(repo: &mut impl EntityRepo, uid: &EntityUid) -> Result<(RecordHeader, Entity)> {
    repo.load_webhook_entity_by_uid(uid).map_err(Into::into)
}

pub fn load_all(
    repo: &mut impl EntityRepo,
    collector: &mut impl ReservableRecordCollector<Header = RecordHeader, Record = Entity>,
) -> Result<()> {
    repo.load_webhook_entities(collector).map_err(Into::into)
}

/// Delete a subscription and return its last state.
pub fn purge(repo: &mut impl EntityRepo, uid: &EntityUid) -> Result<Entity> {
    let entity = repo.purge_webhook_entity_by_uid(uid)?;
    log::info!("Deleted webhook {uid}");
    Ok(entity)
}
