// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::MutexGuard;

use crate::ike::{
    collaborators::{Bus, Hasher, Rng, Sa},
    entry::{EntryHandle, Lifecycle},
    manager::{Checkout, Manager},
    segment::{SegmentInner, lock_segment},
    table::Table,
};

/// Cursor over every entry in the table, in segment-interleaved row order:
/// segment 0's rows (0, segment_count, 2*segment_count, ...), then segment
/// 1's, and so on. Holds at most one segment's mutex at a time, releasing
/// it as soon as its last row is exhausted.
///
/// Not consistent: entries inserted or removed during the walk may or may
/// not be observed. An entry present for the whole walk is visited exactly
/// once.
pub struct Enumerator<'a, S: Sa> {
    table: &'a Table<S>,
    seg_idx: usize,
    slot: usize,
    idx_in_row: usize,
    guard: Option<MutexGuard<'a, SegmentInner<S>>>,
}

impl<'a, S: Sa> Enumerator<'a, S> {
    pub(crate) fn new(table: &'a Table<S>) -> Self {
        Enumerator {
            table,
            seg_idx: 0,
            slot: 0,
            idx_in_row: 0,
            guard: None,
        }
    }

    pub fn next(&mut self) -> Option<EntryHandle<S>> {
        loop {
            if self.seg_idx >= self.table.segments.len() {
                self.guard = None;
                return None;
            }
            if self.guard.is_none() {
                self.guard = Some(lock_segment(&self.table.segments[self.seg_idx]));
            }
            let guard = self.guard.as_ref().expect("just populated");
            let rows_per_segment = guard.rows.len();
            if self.slot >= rows_per_segment {
                self.guard = None;
                self.seg_idx += 1;
                self.slot = 0;
                self.idx_in_row = 0;
                continue;
            }
            let row_len = guard.rows[self.slot].len();
            if self.idx_in_row >= row_len {
                self.slot += 1;
                self.idx_in_row = 0;
                continue;
            }
            let entry = guard.rows[self.slot][self.idx_in_row].clone();
            self.idx_in_row += 1;
            return Some(entry);
        }
    }
}

impl<'a, S: Sa> Drop for Enumerator<'a, S> {
    fn drop(&mut self) {
        self.guard = None;
    }
}

/// Wraps [`Enumerator`], skipping entries that cannot be acquired without
/// blocking (currently checked out, or draining/dead), and handing back
/// live entries as ordinary [`Checkout`]s.
pub struct LiveEnumerator<'a, S: Sa, R: Rng, H: Hasher, B: Bus> {
    inner: Enumerator<'a, S>,
    manager: &'a Manager<S, R, H, B>,
}

impl<'a, S: Sa, R: Rng, H: Hasher, B: Bus> LiveEnumerator<'a, S, R, H, B> {
    pub(crate) fn new(table: &'a Table<S>, manager: &'a Manager<S, R, H, B>) -> Self {
        LiveEnumerator { inner: Enumerator::new(table), manager }
    }

    pub fn next(&mut self) -> Option<Checkout<'a, S, R, H, B>> {
        loop {
            let entry = self.inner.next()?;
            let mut coord = entry.lock();
            if coord.lifecycle != Lifecycle::Live || coord.checked_out {
                continue;
            }
            coord.checked_out = true;
            let sa = coord.sa.take().expect("live entry missing its SA");
            drop(coord);
            return Some(self.manager.make_checkout(entry, sa));
        }
    }
}
