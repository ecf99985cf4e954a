// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{collections::HashSet, sync::Arc, thread};

use super::*;

#[test]
fn follow_the_clock() {
    let sequencer = Sequencer::new();
    assert_eq!(None, sequencer.last_issued());
    assert_eq!(TrackSequence::new(1000), sequencer.next_at(1000));
    assert_eq!(TrackSequence::new(2000), sequencer.next_at(2000));
    assert_eq!(Some(TrackSequence::new(2000)), sequencer.last_issued());
}

#[test]
fn increment_if_clock_stalls() {
    let sequencer = Sequencer::new();
    assert_eq!(TrackSequence::new(1000), sequencer.next_at(1000));
    assert_eq!(TrackSequence::new(1001), sequencer.next_at(1000));
    assert_eq!(TrackSequence::new(1002), sequencer.next_at(1000));
}

#[test]
fn increment_if_clock_goes_backwards() {
    let sequencer = Sequencer::new();
    assert_eq!(TrackSequence::new(1000), sequencer.next_at(1000));
    assert_eq!(TrackSequence::new(1001), sequencer.next_at(500));
    assert_eq!(TrackSequence::new(1500), sequencer.next_at(1500));
}

#[test]
fn resume_after_previously_issued() {
    let sequencer = Sequencer::resume_after(TrackSequence::new(5000));
    assert_eq!(TrackSequence::new(5001), sequencer.next_at(4000));
    assert_eq!(TrackSequence::new(6000), sequencer.next_at(6000));
}

#[test]
fn always_after_origin() {
    let sequencer = Sequencer::new();
    assert!(sequencer.next_at(0) > TrackSequence::ORIGIN);
    assert!(sequencer.next_at(-1) > TrackSequence::ORIGIN);
}

#[test]
fn strictly_increasing_with_wall_clock() {
    let sequencer = Sequencer::new();
    let mut last = TrackSequence::ORIGIN;
    for _ in 0..1000 {
        let next = sequencer.next();
        assert!(next > last);
        last = next;
    }
}

#[test]
fn unique_across_threads() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 500;
    let sequencer = Arc::new(Sequencer::new());
    let handles = (0..THREADS)
        .map(|_| {
            let sequencer = Arc::clone(&sequencer);
            thread::spawn(move || {
                let mut issued = Vec::with_capacity(PER_THREAD);
                for _ in 0..PER_THREAD {
                    issued.push(sequencer.next());
                }
                issued
            })
        })
        .collect::<Vec<_>>();
    let mut all = HashSet::new();
    for handle in handles {
        let issued = handle.join().unwrap();
        // Strictly increasing within each thread
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        all.extend(issued);
    }
    assert_eq!(THREADS * PER_THREAD, all.len());
}
