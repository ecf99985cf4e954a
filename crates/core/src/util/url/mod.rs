// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use ::url::Url;
use thiserror::Error;

const HTTP_SCHEME: &str = "http";
const HTTPS_SCHEME: &str = "https";

#[derive(Error, Debug)]
pub enum HttpUrlError {
    #[error(transparent)]
    Parse(#[from] ::url::ParseError),

    #[error("unsupported scheme \"{0}\"")]
    UnsupportedScheme(String),

    #[error("missing host")]
    MissingHost,
}

/// Checks that an URL can be fetched from or posted to via HTTP(S).
pub fn validate_http_url(url: &Url) -> Result<(), HttpUrlError> {
    if !is_http_scheme(url.scheme()) {
        return Err(HttpUrlError::UnsupportedScheme(url.scheme().to_owned()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(HttpUrlError::MissingHost);
    }
    Ok(())
}

#[must_use]
pub fn is_http_url(url: &Url) -> bool {
    validate_http_url(url).is_ok()
}

pub fn parse_http_url(input: &str) -> Result<Url, HttpUrlError> {
    let url = Url::parse(input.trim())?;
    validate_http_url(&url)?;
    Ok(url)
}

fn is_http_scheme(scheme: &str) -> bool {
    scheme == HTTP_SCHEME || scheme == HTTPS_SCHEME
}

#[cfg(test)]
mod tests;
