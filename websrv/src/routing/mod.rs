// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

use aloft_backend_embedded::{
    fetch::HttpTrackFetcher, prelude::Gatekeeper, track::ingest::IngestEnvironment,
    webhook::dispatch::HttpNotificationSender,
};
use aloft_core::Sequencer;
use aloft_usecases::webhook::dispatch::CursorAdvancePolicy;
use jiff::Timestamp;

pub(crate) mod admin;
pub(crate) mod api;

/// State that is shared by all request handlers.
pub(crate) struct Services {
    pub(crate) db_gatekeeper: Gatekeeper,
    pub(crate) sequencer: Sequencer,
    pub(crate) track_fetcher: HttpTrackFetcher,
    pub(crate) notification_sender: HttpNotificationSender,
    pub(crate) cursor_advance_policy: CursorAdvancePolicy,
    pub(crate) ticker_page_size: NonZeroU64,
    pub(crate) launched_at: Timestamp,
}

impl Services {
    pub(crate) fn ingest_environment(
        &self,
    ) -> IngestEnvironment<'_, HttpTrackFetcher, HttpNotificationSender> {
        IngestEnvironment {
            db_gatekeeper: &self.db_gatekeeper,
            sequencer: &self.sequencer,
            fetcher: &self.track_fetcher,
            sender: &self.notification_sender,
            cursor_advance_policy: self.cursor_advance_policy,
        }
    }
}
