// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn new_webhook(min_trigger_count: TriggerCount) -> Webhook {
    Webhook {
        target_url: "https://hooks.example.com/notify".parse().unwrap(),
        min_trigger_count,
        last_delivered_sequence: TrackSequence::ORIGIN,
    }
}

#[test]
fn trigger_threshold_is_exclusive() {
    let webhook = new_webhook(2);
    assert!(!webhook.is_triggered_by(0));
    assert!(!webhook.is_triggered_by(1));
    assert!(!webhook.is_triggered_by(2));
    assert!(webhook.is_triggered_by(3));
}

#[test]
fn zero_threshold_triggers_on_every_new_track() {
    let webhook = new_webhook(0);
    assert!(!webhook.is_triggered_by(0));
    assert!(webhook.is_triggered_by(1));
}

#[test]
fn default_threshold_requires_two_new_tracks() {
    let webhook = new_webhook(Webhook::DEFAULT_MIN_TRIGGER_COUNT);
    assert!(!webhook.is_triggered_by(1));
    assert!(webhook.is_triggered_by(2));
}

#[test]
fn validate_webhook() {
    assert!(new_webhook(1).is_valid());
    let webhook = Webhook {
        target_url: "mailto:pilot@example.com".parse().unwrap(),
        ..new_webhook(1)
    };
    assert!(!webhook.is_valid());
    let webhook = Webhook {
        last_delivered_sequence: TrackSequence::new(-1),
        ..new_webhook(1)
    };
    assert!(!webhook.is_valid());
}
