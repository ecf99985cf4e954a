// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn accept_http_and_https() {
    assert!(parse_http_url("http://example.com/track.igc").is_ok());
    assert!(parse_http_url(" https://example.com/track.igc ").is_ok());
}

#[test]
fn reject_other_schemes() {
    assert!(matches!(
        parse_http_url("file:///tmp/track.igc"),
        Err(HttpUrlError::UnsupportedScheme(_))
    ));
    assert!(matches!(
        parse_http_url("ftp://example.com/track.igc"),
        Err(HttpUrlError::UnsupportedScheme(_))
    ));
}

#[test]
fn reject_unparseable_input() {
    assert!(matches!(parse_http_url(""), Err(HttpUrlError::Parse(_))));
    assert!(matches!(
        parse_http_url("not a url"),
        Err(HttpUrlError::Parse(_))
    ));
}
