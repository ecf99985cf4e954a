// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::{NonZeroU32, NonZeroU64},
    result::Result as StdResult,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use aloft_storage_sqlite::connection::{
    Config as ConnectionConfig, Storage,
    pool::{Config as PoolConfig, gatekeeper::Config as GatekeeperConfig},
};
use aloft_usecases::webhook::dispatch::Notification;
use url::Url;

use crate::{
    fetch::{FetchError, FetchTrackFile},
    prelude::*,
    storage::{DatabaseConfig, commission_database},
    webhook::dispatch::{DeliveryError, SendNotification},
};

pub(crate) const IGC_SAMPLE: &str = "AXXXABC FLIGHT:1
HFDTE020718
HFPLTPILOTINCHARGE: Miguel Angel Gordillo
HFGTYGLIDERTYPE: RV8
HFGIDGLIDERID: EC-XLL
B0945094743983N00826978EA0012900157
B0945104743971N00827012EA0012900157
";

pub(crate) fn new_gatekeeper() -> anyhow::Result<Gatekeeper> {
    commission_database(&DatabaseConfig {
        connection: ConnectionConfig {
            storage: Storage::InMemory,
            pool: PoolConfig {
                max_size: NonZeroU32::MIN,
                gatekeeper: GatekeeperConfig {
                    acquire_read_timeout_millis: NonZeroU64::new(5_000).unwrap(),
                    acquire_write_timeout_millis: NonZeroU64::new(5_000).unwrap(),
                },
            },
        },
        migrate_schema: true,
    })
}

/// Serves the same content for every URL.
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    pub(crate) content: Option<String>,
}

impl StaticFetcher {
    pub(crate) fn igc_sample() -> Self {
        Self {
            content: Some(IGC_SAMPLE.to_owned()),
        }
    }
}

impl FetchTrackFile for StaticFetcher {
    async fn fetch_track_file(&self, source_url: &Url) -> StdResult<String, FetchError> {
        self.content
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{source_url} is unreachable").into())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSender {
    pub(crate) failing: AtomicBool,
    pub(crate) attempts: Mutex<Vec<(Url, Notification)>>,
}

impl RecordingSender {
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub(crate) fn take_attempts(&self) -> Vec<(Url, Notification)> {
        std::mem::take(&mut *self.attempts.lock().unwrap())
    }
}

impl SendNotification for RecordingSender {
    async fn send_notification(
        &self,
        target_url: &Url,
        notification: &Notification,
    ) -> StdResult<(), DeliveryError> {
        self.attempts
            .lock()
            .unwrap()
            .push((target_url.clone(), notification.clone()));
        if self.failing.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("subscriber is unavailable").into());
        }
        Ok(())
    }
}
