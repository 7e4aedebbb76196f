// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::{Mutex, MutexGuard};

use crate::ike::{collaborators::Sa, entry::EntryHandle};

/// One shard of the table: a non-recursive mutex guarding a fixed set of
/// rows plus their combined entry count.
///
/// The original manager this crate's design is modeled on uses a recursive
/// mutex so `flush`'s SA-deletion pass can call back out through listener
/// code while still "holding" the lock. That reentrancy is unnecessary
/// here: [`crate::ike::manager::Manager::flush`] drops every segment guard
/// before invoking `Sa::delete`, so a plain `Mutex` suffices.
pub struct SegmentInner<S: Sa> {
    /// Rows owned by this segment, indexed by `row / segment_count` (see
    /// [`crate::ike::table::Table::slot_of`]).
    pub rows: Vec<Vec<EntryHandle<S>>>,
    pub count: usize,
}

pub type Segment<S> = Mutex<SegmentInner<S>>;

impl<S: Sa> SegmentInner<S> {
    pub fn new(rows_per_segment: usize) -> Self {
        SegmentInner {
            rows: (0..rows_per_segment).map(|_| Vec::new()).collect(),
            count: 0,
        }
    }

    pub fn insert(&mut self, slot: usize, entry: EntryHandle<S>) {
        self.rows[slot].push(entry);
        self.count += 1;
    }

    /// Removes the first entry in `slot` matching `pred`, returning it.
    pub fn remove(
        &mut self,
        slot: usize,
        pred: impl Fn(&EntryHandle<S>) -> bool,
    ) -> Option<EntryHandle<S>> {
        let row = &mut self.rows[slot];
        let pos = row.iter().position(pred)?;
        self.count -= 1;
        Some(row.remove(pos))
    }

    pub fn find(
        &self,
        slot: usize,
        pred: impl Fn(&EntryHandle<S>) -> bool,
    ) -> Option<EntryHandle<S>> {
        self.rows[slot].iter().find(|e| pred(e)).cloned()
    }
}

/// Locks a segment, recovering its contents on poison rather than
/// propagating — a panic local to one worker's brief structural lookup
/// must not wedge every other row in the segment forever.
pub fn lock_segment<S: Sa>(seg: &Segment<S>) -> MutexGuard<'_, SegmentInner<S>> {
    match seg.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
