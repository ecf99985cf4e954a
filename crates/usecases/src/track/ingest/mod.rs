// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Stages of ingesting a track from a remote IGC file.

use std::fmt;

use aloft_core::util::url::parse_http_url;
use aloft_track_file::{ParsedTrack, parse_igc};
use url::Url;

use crate::{InputError, InputResult};

/// Stages in the order they are passed.
///
/// [`IngestStage::Failed`] is reachable from every stage that is not
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestStage {
    Received,
    Sequenced,
    Parsed,
    Persisted,
    Notified,
    Done,
    Failed,
}

impl IngestStage {
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        let next = match self {
            Self::Received => Self::Sequenced,
            Self::Sequenced => Self::Parsed,
            Self::Parsed => Self::Persisted,
            Self::Persisted => Self::Notified,
            Self::Notified => Self::Done,
            Self::Done | Self::Failed => return None,
        };
        Some(next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Sequenced => "sequenced",
            Self::Parsed => "parsed",
            Self::Persisted => "persisted",
            Self::Notified => "notified",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the stage of a single ingest.
#[derive(Debug)]
pub struct IngestProgress {
    source_url: Url,
    stage: IngestStage,
}

impl IngestProgress {
    #[must_use]
    pub const fn new(source_url: Url) -> Self {
        Self {
            source_url,
            stage: IngestStage::Received,
        }
    }

    #[must_use]
    pub const fn source_url(&self) -> &Url {
        &self.source_url
    }

    #[must_use]
    pub const fn stage(&self) -> IngestStage {
        self.stage
    }

    /// Move on to the next stage.
    ///
    /// Terminal stages are never left.
    pub fn advance(&mut self) -> IngestStage {
        if let Some(next) = self.stage.successor() {
            log::debug!(
                "Ingesting {source_url}: {prev} -> {next}",
                source_url = self.source_url,
                prev = self.stage,
            );
            self.stage = next;
        }
        self.stage
    }

    pub fn fail(&mut self, err: &dyn fmt::Display) {
        if self.stage.is_terminal() {
            return;
        }
        log::debug!(
            "Ingesting {source_url}: {prev} -> {next}: {err}",
            source_url = self.source_url,
            prev = self.stage,
            next = IngestStage::Failed,
        );
        self.stage = IngestStage::Failed;
    }
}

/// Check that the submitted URL refers to a remote resource
/// that could be fetched.
pub fn validate_source_url(input: &str) -> InputResult<Url> {
    parse_http_url(input)
        .map_err(|err| InputError(anyhow::anyhow!("invalid track URL \"{input}\": {err}")))
}

/// Parse the contents of a fetched track file.
pub fn parse_track_file(source_url: &Url, content: &str) -> InputResult<ParsedTrack> {
    parse_igc(content).map_err(|err| {
        InputError(anyhow::anyhow!(
            "failed to parse track file from {source_url}: {err}"
        ))
    })
}

#[cfg(test)]
mod tests;
