// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod util;

mod entity;
pub use self::entity::*;

pub mod track;
pub use self::track::{
    Entity as TrackEntity, EntityUid as TrackUid, Track, TrackSequence, sequence::Sequencer,
};

pub mod webhook;
pub use self::webhook::{Entity as WebhookEntity, EntityUid as WebhookUid, Webhook};

pub mod prelude {
    pub(crate) use semval::prelude::*;
    // Re-export trait methods from semval
    pub use semval::{IntoValidated as _, IsValid, Validate as _, ValidatedFrom as _};

    pub(crate) use crate::{
        entity::*,
        util::{clock::*, *},
    };
}
