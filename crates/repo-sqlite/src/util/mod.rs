// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU64;

pub(crate) mod entity;

pub(crate) fn sql_nonzero_limit(limit: NonZeroU64) -> i64 {
    i64::try_from(limit.get()).unwrap_or(i64::MAX)
}

pub(crate) fn count_from_sql(count: i64) -> u64 {
    debug_assert!(count >= 0);
    u64::try_from(count).unwrap_or_default()
}
