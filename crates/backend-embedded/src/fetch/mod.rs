// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Retrieval of remote track files.

use std::{future::Future, result::Result as StdResult};

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("unexpected response status {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub trait FetchTrackFile {
    /// Download the contents of a track file as text.
    fn fetch_track_file(
        &self,
        source_url: &Url,
    ) -> impl Future<Output = StdResult<String, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTrackFetcher {
    client: Client,
}

impl HttpTrackFetcher {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl FetchTrackFile for HttpTrackFetcher {
    async fn fetch_track_file(&self, source_url: &Url) -> StdResult<String, FetchError> {
        log::debug!("Fetching track file from {source_url}");
        let response = self.client.get(source_url.clone()).send().await?;
        let response_status = response.status();
        if !response_status.is_success() {
            return Err(FetchError::Status(response_status));
        }
        response.text().await.map_err(Into::into)
    }
}
