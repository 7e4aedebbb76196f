// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    net::IpAddr,
    sync::{Arc, Condvar, Mutex, MutexGuard},
};

use crate::ike::{
    collaborators::{ChildSa, Sa},
    sa_id::SaId,
};

/// Lifecycle of a table entry, replacing a pair of boolean drive-out flags
/// with a single tagged state. `Draining` covers both "don't hand this
/// entry to new waiters" and "wake current waiters so they can leave" —
/// `checkin_and_destroy` and `flush` always want both together anyway.
/// Transitions are monotonic: `Live -> Draining -> Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    Draining,
    Dead,
}

/// The mutable state of one table entry, guarded by [`Entry::coord`].
///
/// Each entry carries its own mutex and condition variable rather than
/// sharing the segment's: the segment lock is only ever needed briefly, to
/// locate, insert, or remove an entry from its row, and releasing it before
/// a (possibly long) wait lets unrelated rows in the same segment keep
/// moving. The entry's own lock also makes handing the SA in and out of the
/// entry a matter of ordinary ownership (`Option::take`/`Some`) rather than
/// threading a borrowed guard past the point the segment lock is dropped.
pub struct Coord<S: Sa> {
    /// `None` while checked out — the SA has been handed to its lessee.
    pub sa: Option<S>,
    pub id: SaId,
    pub init_hash: Vec<u8>,
    pub other_host: Option<IpAddr>,
    pub my_id: Option<String>,
    pub other_id: Option<String>,
    /// Cached from `Sa::unique_id`/`Sa::name`/`Sa::children` on every
    /// `checkin`, so `checkout_by_id`/`checkout_by_name` can scan entries
    /// that are currently checked out (and therefore have no live `S` to
    /// read from — see [`Coord::sa`]) without blocking on each candidate.
    /// Empty/zero until the entry's first checkin.
    pub unique_id: u32,
    pub name: String,
    pub children: Vec<ChildSa>,
    pub checked_out: bool,
    pub waiters: u32,
    pub lifecycle: Lifecycle,
    pub message_id: Option<u32>,
}

pub struct Entry<S: Sa> {
    pub coord: Mutex<Coord<S>>,
    pub condvar: Condvar,
}

pub type EntryHandle<S> = Arc<Entry<S>>;

impl<S: Sa> Entry<S> {
    /// Every entry the manager creates is inserted already checked out —
    /// the SA is handed back to whichever `checkout_*` call triggered the
    /// creation rather than ever being stored here.
    pub fn new(id: SaId) -> EntryHandle<S> {
        Arc::new(Entry {
            coord: Mutex::new(Coord {
                sa: None,
                id,
                init_hash: Vec::new(),
                other_host: None,
                my_id: None,
                other_id: None,
                unique_id: 0,
                name: String::new(),
                children: Vec::new(),
                checked_out: true,
                waiters: 0,
                lifecycle: Lifecycle::Live,
                message_id: None,
            }),
            condvar: Condvar::new(),
        })
    }

    pub fn lock(&self) -> MutexGuard<'_, Coord<S>> {
        match self.coord.lock() {
            Ok(guard) => guard,
            // A panic while holding this entry's lock leaves only its own
            // coordination state suspect; recovering it is the best
            // remaining option for the rest of the table's liveness.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<S: Sa> Coord<S> {
    /// Blocks the caller until this entry is no longer checked out, or
    /// returns `false` immediately (without blocking) if the entry is
    /// draining or dead. Returns the guard so the caller can keep using it.
    pub fn wait_for_entry<'a>(
        mut guard: MutexGuard<'a, Self>,
        condvar: &Condvar,
    ) -> (MutexGuard<'a, Self>, bool) {
        if guard.lifecycle != Lifecycle::Live {
            return (guard, false);
        }
        while guard.checked_out && guard.lifecycle == Lifecycle::Live {
            guard.waiters += 1;
            guard = match condvar.wait(guard) {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.waiters -= 1;
        }
        if guard.lifecycle != Lifecycle::Live {
            // forward the wakeup: others may be waiting on it too.
            condvar.notify_one();
            return (guard, false);
        }
        (guard, true)
    }
}
