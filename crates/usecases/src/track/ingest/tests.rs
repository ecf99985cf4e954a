// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn progress() -> IngestProgress {
    IngestProgress::new(Url::parse("http://example.com/track.igc").unwrap())
}

#[test]
fn pass_all_stages_in_order() {
    let mut progress = progress();
    assert_eq!(IngestStage::Received, progress.stage());
    assert_eq!(IngestStage::Sequenced, progress.advance());
    assert_eq!(IngestStage::Parsed, progress.advance());
    assert_eq!(IngestStage::Persisted, progress.advance());
    assert_eq!(IngestStage::Notified, progress.advance());
    assert_eq!(IngestStage::Done, progress.advance());
    // Terminal
    assert_eq!(IngestStage::Done, progress.advance());
}

#[test]
fn fail_from_any_intermediate_stage() {
    for steps in 0..5 {
        let mut progress = progress();
        for _ in 0..steps {
            progress.advance();
        }
        progress.fail(&"error");
        assert_eq!(IngestStage::Failed, progress.stage());
        assert_eq!(IngestStage::Failed, progress.advance());
    }
}

#[test]
fn done_is_never_failed() {
    let mut progress = progress();
    while !progress.stage().is_terminal() {
        progress.advance();
    }
    progress.fail(&"late error");
    assert_eq!(IngestStage::Done, progress.stage());
}

#[test]
fn validate_source_urls() {
    assert_eq!(
        "https://example.com/a.igc",
        validate_source_url(" https://example.com/a.igc ")
            .unwrap()
            .as_str()
    );
    assert!(validate_source_url("").is_err());
    assert!(validate_source_url("example.com/a.igc").is_err());
    assert!(validate_source_url("ftp://example.com/a.igc").is_err());
    assert!(validate_source_url("file:///tmp/a.igc").is_err());
}

#[test]
fn parse_errors_are_input_errors() {
    let source_url = Url::parse("http://example.com/track.igc").unwrap();
    assert!(parse_track_file(&source_url, "<html></html>").is_err());
    let parsed = parse_track_file(&source_url, "AXXX\nHFDTE020718\n").unwrap();
    assert_eq!(jiff::civil::date(2018, 7, 2), parsed.recorded_date);
}
