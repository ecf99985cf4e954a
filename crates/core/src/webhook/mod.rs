// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use ::url::Url;

use crate::{prelude::*, track::TrackSequence, util::url::is_http_url};

pub type TriggerCount = u32;

/// A subscription for notifications about newly ingested tracks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Webhook {
    /// Notifications are posted to this URL
    pub target_url: Url,

    /// The number of new tracks that must be exceeded before
    /// a notification is sent.
    pub min_trigger_count: TriggerCount,

    /// All tracks up to and including this position have already
    /// been announced.
    ///
    /// Only moves forward.
    pub last_delivered_sequence: TrackSequence,
}

impl Webhook {
    pub const DEFAULT_MIN_TRIGGER_COUNT: TriggerCount = 1;

    /// Decide if a notification is due for the given number of new,
    /// not yet announced tracks.
    ///
    /// The threshold is exclusive: With a `min_trigger_count` of 2
    /// a notification requires at least 3 new tracks.
    #[must_use]
    pub fn is_triggered_by(&self, new_track_count: usize) -> bool {
        u64::try_from(new_track_count).unwrap_or(u64::MAX) > u64::from(self.min_trigger_count)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WebhookInvalidity {
    TargetUrlNotHttp,
    LastDeliveredSequenceBeforeOrigin,
}

impl Validate for Webhook {
    type Invalidity = WebhookInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !is_http_url(&self.target_url),
                WebhookInvalidity::TargetUrlNotHttp,
            )
            .invalidate_if(
                self.last_delivered_sequence < TrackSequence::ORIGIN,
                WebhookInvalidity::LastDeliveredSequenceBeforeOrigin,
            )
            .into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityType;

impl crate::entity::EntityType for EntityType {}

pub type EntityUid = EntityUidTyped<EntityType>;

pub type Entity = crate::entity::Entity<EntityType, Webhook>;

#[cfg(test)]
mod tests;
