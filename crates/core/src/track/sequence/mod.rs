// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Assignment of strictly increasing sequence numbers.

use parking_lot::Mutex;

use super::TrackSequence;
use crate::util::clock::{TimestampMillis, UtcDateTimeMs};

/// Issues [`TrackSequence`] numbers that are derived from the current
/// time in milliseconds.
///
/// Numbers are strictly increasing across all callers of the same
/// instance. If the clock does not advance between two calls or even
/// goes backwards the previously issued number is incremented instead.
#[derive(Debug, Default)]
pub struct Sequencer {
    last_issued: Mutex<Option<TrackSequence>>,
}

impl Sequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_issued: Mutex::new(None),
        }
    }

    /// Continue after a number that has been issued before, e.g.
    /// the latest sequence number found in the database on startup.
    #[must_use]
    pub const fn resume_after(last_issued: TrackSequence) -> Self {
        Self {
            last_issued: Mutex::new(Some(last_issued)),
        }
    }

    /// Issue the next number.
    ///
    /// The clock is read while holding the lock.
    pub fn next(&self) -> TrackSequence {
        let mut last_issued = self.last_issued.lock();
        let now = UtcDateTimeMs::now().unix_timestamp_millis();
        let next = next_after(*last_issued, now);
        *last_issued = Some(next);
        next
    }

    /// Issue the next number for the given clock reading.
    pub fn next_at(&self, now_millis: TimestampMillis) -> TrackSequence {
        let mut last_issued = self.last_issued.lock();
        let next = next_after(*last_issued, now_millis);
        *last_issued = Some(next);
        next
    }

    #[must_use]
    pub fn last_issued(&self) -> Option<TrackSequence> {
        *self.last_issued.lock()
    }
}

fn next_after(last_issued: Option<TrackSequence>, now_millis: TimestampMillis) -> TrackSequence {
    let now = TrackSequence::new(now_millis.max(TrackSequence::ORIGIN.value() + 1));
    match last_issued {
        Some(last_issued) if now <= last_issued => {
            TrackSequence::new(last_issued.value().saturating_add(1))
        }
        _ => now,
    }
}

#[cfg(test)]
mod tests;
