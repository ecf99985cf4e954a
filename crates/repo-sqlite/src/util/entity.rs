// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use aloft_core::{EntityType, EntityUid, EntityUidTyped};

pub(crate) fn decode_entity_uid(uid: &str) -> anyhow::Result<EntityUid> {
    EntityUid::decode_from(uid).map_err(|err| anyhow::anyhow!("invalid entity UID \"{uid}\": {err}"))
}

pub(crate) fn decode_entity_uid_typed<T: EntityType>(uid: &str) -> anyhow::Result<EntityUidTyped<T>> {
    decode_entity_uid(uid).map(EntityUidTyped::from_untyped)
}

pub(crate) fn encode_entity_uid(uid: &impl AsRef<EntityUid>) -> String {
    uid.as_ref().encode_to_string()
}
