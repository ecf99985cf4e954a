// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[derive(Debug)]
struct DummyType;

impl EntityType for DummyType {}

#[test]
fn random_uids_are_distinct_and_not_nil() {
    let first = EntityUid::random();
    let second = EntityUid::random();
    assert_ne!(first, second);
    assert!(!first.is_nil());
    assert!(EntityUid::default().is_nil());
}

#[test]
fn encode_decode_string() {
    let uid = EntityUid::random();
    let encoded = uid.encode_to_string();
    assert_eq!(EntityUid::STR_LEN, encoded.len());
    assert_eq!(uid, EntityUid::decode_from(&encoded).unwrap());
    assert_eq!(encoded, uid.to_string());
}

#[test]
fn reject_malformed_strings() {
    assert!(EntityUid::decode_from("").is_err());
    assert!(EntityUid::decode_from("not-a-valid-uid").is_err());
    assert!("01ARZ3NDEKTSV4RRFFQ69G5FA".parse::<EntityUid>().is_err());
}

#[test]
fn typed_uid_parses_like_untyped() {
    let uid = EntityUid::random();
    let typed = uid
        .to_string()
        .parse::<EntityUidTyped<DummyType>>()
        .unwrap();
    assert_eq!(uid, typed.into_untyped());
    assert_eq!(uid.to_string(), typed.to_string());
}
