// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

///////////////////////////////////////////////////////////////////////

diesel::table! {
    track (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        entity_uid -> Text,
        sequence -> BigInt,
        source_url -> Text,
        recorded_date -> Text,
        pilot -> Text,
        glider_model -> Text,
        glider_id -> Text,
        length_meters -> Double,
    }
}
