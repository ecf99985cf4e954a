// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_backend_embedded::{
    fetch::FetchTrackFile,
    track::ingest::{IngestEnvironment, ingest},
    webhook::dispatch::SendNotification,
};

use super::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    pub url: String,
}

pub type ResponseBody = CreatedEntity;

/// Ingest a track from the given URL.
///
/// Runs asynchronously on the gatekeeper of the environment instead
/// of a single database connection.
pub async fn handle_request<F, S>(
    env: &IngestEnvironment<'_, F, S>,
    request_body: RequestBody,
) -> Result<ResponseBody>
where
    F: FetchTrackFile + Sync,
    S: SendNotification + Sync,
{
    let RequestBody { url } = request_body;
    let entity = ingest(env, &url).await?;
    Ok(CreatedEntity::new(entity.uid))
}
