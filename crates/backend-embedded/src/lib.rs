// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

pub mod fetch;
pub mod storage;
pub mod track;
pub mod webhook;

pub type Error = aloft_usecases_sqlite::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use aloft_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;

    pub use super::{Error, Result};
}

/// Create the client that is shared by all outgoing requests.
///
/// The timeout applies to each request as a whole.
pub fn new_http_client(request_timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(request_timeout)
        .build()
}

#[cfg(test)]
mod tests;
