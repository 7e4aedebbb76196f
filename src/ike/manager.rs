// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    net::IpAddr,
    ops::{Deref, DerefMut},
    sync::Arc,
};

use tracing::{debug, error, trace, warn};

use crate::{
    cfg::config::ManagerConfig,
    ike::{
        collaborators::{
            Bus, DefaultHasher, DefaultRng, Hasher, InboundMessage, NoopBus, PeerSelector, Rng,
            Sa, SaFactory, SaState, next_spi,
        },
        entry::{Coord, Entry, EntryHandle, Lifecycle},
        enumerator::{Enumerator, LiveEnumerator},
        error::{CheckinError, CheckoutError, ManagerBuildError},
        sa_id::SaId,
        segment::lock_segment,
        table::Table,
    },
};

/// An `%any` identity, one that has not yet been learned (`stored` is
/// `None`), is a wildcard on the stored side; an absent `wanted` selector
/// is a wildcard too, since a caller with no preference accepts anything.
fn identity_matches(stored: Option<&str>, wanted: Option<&str>) -> bool {
    match stored {
        None => true,
        Some(s) => s == "%any" || wanted.is_none_or(|w| w == s),
    }
}

/// `None` on either side is treated as the wildcard address.
fn host_matches(stored: Option<IpAddr>, wanted: Option<IpAddr>) -> bool {
    wanted.is_none() || stored.is_none() || wanted == stored
}

/// Temporary exclusive lease of one SA, returned by every `checkout_*`
/// operation. Dereferences to the leased `S`; consumed by [`Manager::checkin`]
/// or [`Manager::checkin_and_destroy`]. A `Checkout` dropped without either
/// is checked back in automatically (see the `Drop` impl) — a panicking
/// worker must not wedge the entry for everyone else.
pub struct Checkout<'a, S: Sa, R: Rng, H: Hasher, B: Bus> {
    entry: EntryHandle<S>,
    sa: Option<S>,
    manager: &'a Manager<S, R, H, B>,
    finished: bool,
}

impl<'a, S: Sa, R: Rng, H: Hasher, B: Bus> Checkout<'a, S, R, H, B> {
    fn new(entry: EntryHandle<S>, sa: S, manager: &'a Manager<S, R, H, B>) -> Self {
        Checkout { entry, sa: Some(sa), manager, finished: false }
    }

    /// Consumes the guard without running the auto-checkin `Drop`,
    /// handing the entry and SA back to the caller (a `Manager` method).
    fn take(mut self) -> (EntryHandle<S>, S) {
        self.finished = true;
        let sa = self.sa.take().expect("checkout already consumed");
        (self.entry.clone(), sa)
    }
}

impl<'a, S: Sa, R: Rng, H: Hasher, B: Bus> Deref for Checkout<'a, S, R, H, B> {
    type Target = S;

    fn deref(&self) -> &S {
        self.sa.as_ref().expect("checkout already consumed")
    }
}

impl<'a, S: Sa, R: Rng, H: Hasher, B: Bus> DerefMut for Checkout<'a, S, R, H, B> {
    fn deref_mut(&mut self) -> &mut S {
        self.sa.as_mut().expect("checkout already consumed")
    }
}

impl<'a, S: Sa, R: Rng, H: Hasher, B: Bus> std::fmt::Debug for Checkout<'a, S, R, H, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout").field("finished", &self.finished).finish_non_exhaustive()
    }
}

impl<'a, S: Sa, R: Rng, H: Hasher, B: Bus> Drop for Checkout<'a, S, R, H, B> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Some(sa) = self.sa.take() {
            error!(id = %sa.id(), "ike sa checkout dropped without an explicit checkin");
            let _ = self.manager.checkin_internal(self.entry.clone(), sa);
        }
    }
}

/// Builds a [`Manager`], failing only if no [`Rng`] or [`Hasher`] was
/// supplied (see [`ManagerBuildError`]).
pub struct ManagerBuilder<S: Sa, R: Rng, H: Hasher, B: Bus> {
    config: ManagerConfig,
    sa_factory: Box<dyn SaFactory<S>>,
    rng: Option<R>,
    hasher: Option<H>,
    bus: Option<B>,
}

impl<S: Sa, R: Rng, H: Hasher, B: Bus> ManagerBuilder<S, R, H, B> {
    pub fn new(config: ManagerConfig, sa_factory: impl SaFactory<S>) -> Self {
        ManagerBuilder {
            config,
            sa_factory: Box::new(sa_factory),
            rng: None,
            hasher: None,
            bus: None,
        }
    }

    pub fn rng(mut self, rng: R) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn hasher(mut self, hasher: H) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn bus(mut self, bus: B) -> Self {
        self.bus = Some(bus);
        self
    }
}

impl<S: Sa, R: Rng, H: Hasher, B: Bus + Default> ManagerBuilder<S, R, H, B> {
    pub fn build(self) -> Result<Manager<S, R, H, B>, ManagerBuildError> {
        let rng = self.rng.ok_or(ManagerBuildError::MissingRng)?;
        let hasher = self.hasher.ok_or(ManagerBuildError::MissingHasher)?;
        Ok(Manager {
            table: Table::new(self.config.table_size, self.config.table_segments),
            sa_factory: self.sa_factory,
            rng,
            hasher,
            bus: self.bus.unwrap_or_default(),
            reuse_ikesa: self.config.reuse_ikesa,
        })
    }
}

/// Concurrent registry of IKE SAs: the segmented hash table, per-entry
/// lock/condition protocol, and every lookup/lifecycle operation built on
/// top of it.
pub struct Manager<S: Sa, R: Rng, H: Hasher, B: Bus> {
    table: Table<S>,
    sa_factory: Box<dyn SaFactory<S>>,
    rng: R,
    hasher: H,
    bus: B,
    reuse_ikesa: bool,
}

impl<S: Sa, R: Rng, H: Hasher, B: Bus> Manager<S, R, H, B> {
    /// Builds a manager directly; infallible, since `R`/`H`/`B` are already
    /// concrete values rather than optional builder slots. Use
    /// [`ManagerBuilder`] when one or more collaborators may be absent.
    pub fn new(
        config: &ManagerConfig,
        sa_factory: impl SaFactory<S>,
        rng: R,
        hasher: H,
        bus: B,
    ) -> Self {
        Manager {
            table: Table::new(config.table_size, config.table_segments),
            sa_factory: Box::new(sa_factory),
            rng,
            hasher,
            bus,
            reuse_ikesa: config.reuse_ikesa,
        }
    }

    fn find_entry(
        &self,
        init_spi: u64,
        pred: impl Fn(&EntryHandle<S>) -> bool,
    ) -> Option<EntryHandle<S>> {
        let row = self.table.row_of(init_spi);
        let seg_idx = self.table.segment_of(row);
        let slot = self.table.slot_of(row);
        let seg = lock_segment(&self.table.segments[seg_idx]);
        seg.find(slot, pred)
    }

    /// Scans every live entry in the table for one matching `pred`,
    /// evaluated against its cached `Coord` fields — usable whether or
    /// not the entry is currently checked out, unlike a scan that needs
    /// the live `S` (see `Coord::unique_id`/`name`/`children`).
    fn find_any(&self, pred: impl Fn(&Coord<S>) -> bool) -> Option<EntryHandle<S>> {
        let mut cursor = self.create_enumerator();
        while let Some(entry) = cursor.next() {
            let coord = entry.lock();
            if coord.lifecycle == Lifecycle::Live && pred(&coord) {
                drop(coord);
                return Some(entry);
            }
        }
        None
    }

    fn insert_new_entry(&self, id: SaId) -> EntryHandle<S> {
        let row = self.table.row_of(id.init_spi);
        let seg_idx = self.table.segment_of(row);
        let slot = self.table.slot_of(row);
        let entry = Entry::new(id);
        let mut seg = lock_segment(&self.table.segments[seg_idx]);
        seg.insert(slot, entry.clone());
        entry
    }

    fn remove_from_table(&self, entry: &EntryHandle<S>, init_spi: u64) {
        let row = self.table.row_of(init_spi);
        let seg_idx = self.table.segment_of(row);
        let slot = self.table.slot_of(row);
        let mut seg = lock_segment(&self.table.segments[seg_idx]);
        seg.remove(slot, |e| Arc::ptr_eq(e, entry));
    }

    /// Blocks until `entry` is acquirable (not checked out, not
    /// draining), marks it checked out, and wraps it as a [`Checkout`].
    /// Returns [`CheckoutError::DrivenOut`] if the entry is being drained
    /// by a concurrent `flush`/`checkin_and_destroy`.
    fn acquire(&self, entry: EntryHandle<S>) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let coord = entry.lock();
        let (mut coord, ok) = Coord::wait_for_entry(coord, &entry.condvar);
        if !ok {
            return Err(CheckoutError::DrivenOut);
        }
        coord.checked_out = true;
        let sa = coord.sa.take().expect("live entry missing its SA");
        drop(coord);
        self.bus.set_current_sa(Some(&sa));
        Ok(self.make_checkout(entry, sa))
    }

    pub(crate) fn make_checkout(&self, entry: EntryHandle<S>, sa: S) -> Checkout<'_, S, R, H, B> {
        Checkout::new(entry, sa, self)
    }

    /// `checkout(id)` — looks up by `matches_in_flight`, no creation on
    /// miss.
    pub fn checkout(&self, id: SaId) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let entry = self
            .find_entry(id.init_spi, |e| e.lock().id.matches_in_flight(&id))
            .ok_or(CheckoutError::NotFound)?;
        self.acquire(entry)
    }

    /// `checkout_new(role)` — always creates: a fresh random SPI on the
    /// caller's side, zero on the other, inserted already checked out.
    pub fn checkout_new(&self, is_initiator: bool) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let init_spi = next_spi(&self.rng);
        let id = SaId::new(init_spi, 0, is_initiator);
        let entry = self.insert_new_entry(id);
        let sa = self.sa_factory.create(id);
        trace!(%id, "created new ike sa entry");
        self.bus.set_current_sa(Some(&sa));
        Ok(self.make_checkout(entry, sa))
    }

    /// `checkout_by_message(msg)` — dispatches between the IKE_SA_INIT and
    /// subsequent-message checkout protocols.
    pub fn checkout_by_message(
        &self,
        msg: &InboundMessage,
    ) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        if msg.is_ike_sa_init_request {
            self.checkout_by_ike_sa_init(msg)
        } else {
            self.checkout_by_other_message(msg)
        }
    }

    fn checkout_by_ike_sa_init(
        &self,
        msg: &InboundMessage,
    ) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let h = self.hasher.digest(&msg.packet_bytes);
        // We are the responder for an IKE_SA_INIT request; the entry is
        // stored under our own (switched) role.
        let responder_id = msg.sa_id.switched();
        let row = self.table.row_of(responder_id.init_spi);
        let seg_idx = self.table.segment_of(row);
        let slot = self.table.slot_of(row);

        let mut seg = lock_segment(&self.table.segments[seg_idx]);
        let found = seg.find(slot, |e| {
            let c = e.lock();
            c.id.resp_spi == 0
                && c.id.is_initiator == responder_id.is_initiator
                && c.id.init_spi == responder_id.init_spi
                && c.init_hash == h
        });

        let entry = match found {
            Some(entry) => entry,
            None => {
                // No matching entry: synthesize a fresh responder SPI.
                // The bucket is computed from the completed id, which the
                // table's `init_spi`-only hash proves identical to the one
                // this lookup just used — see `Table::row_of`.
                let resp_spi = next_spi(&self.rng);
                let new_id = SaId::new(responder_id.init_spi, resp_spi, false);
                let entry = Entry::new(new_id);
                {
                    let mut coord = entry.lock();
                    coord.init_hash = h;
                    coord.message_id = Some(0);
                }
                seg.insert(slot, entry.clone());
                drop(seg);
                let sa = self.sa_factory.create(new_id);
                debug!(id = %new_id, "created ike sa for fresh IKE_SA_INIT");
                self.bus.set_current_sa(Some(&sa));
                return Ok(self.make_checkout(entry, sa));
            }
        };
        drop(seg);

        if entry.lock().message_id == Some(0) {
            debug!(id = %responder_id, "suppressing IKE_SA_INIT retransmit");
            return Err(CheckoutError::Retransmit);
        }

        let coord = entry.lock();
        let (mut coord, ok) = Coord::wait_for_entry(coord, &entry.condvar);
        if !ok {
            return Err(CheckoutError::DrivenOut);
        }
        coord.checked_out = true;
        coord.message_id = Some(0);
        let sa = coord.sa.take().expect("live entry missing its SA");
        drop(coord);
        debug!(id = %responder_id, "duplicate IKE_SA_INIT for an already-created sa");
        self.bus.set_current_sa(Some(&sa));
        Ok(self.make_checkout(entry, sa))
    }

    fn checkout_by_other_message(
        &self,
        msg: &InboundMessage,
    ) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let lookup_id = msg.sa_id.switched();
        let entry = self
            .find_entry(lookup_id.init_spi, |e| {
                e.lock().id.matches_in_flight(&lookup_id)
            })
            .ok_or(CheckoutError::NotFound)?;

        if msg.is_request && entry.lock().message_id == Some(msg.message_id) {
            debug!(id = %lookup_id, message_id = msg.message_id, "suppressing request retransmit");
            return Err(CheckoutError::Retransmit);
        }

        let coord = entry.lock();
        let (mut coord, ok) = Coord::wait_for_entry(coord, &entry.condvar);
        if !ok {
            return Err(CheckoutError::DrivenOut);
        }
        coord.checked_out = true;
        coord.message_id = Some(msg.message_id);
        if coord.id.resp_spi == 0 {
            coord.id.resp_spi = lookup_id.resp_spi;
        }
        let completed_id = coord.id;
        let mut sa = coord.sa.take().expect("live entry missing its SA");
        drop(coord);
        sa.set_id(completed_id);
        self.bus.set_current_sa(Some(&sa));
        Ok(self.make_checkout(entry, sa))
    }

    /// `checkout_by_config(peer_cfg)` — reuses a matching live entry
    /// unless `reuse_ikesa` is disabled or none is found, else creates as
    /// initiator with a fresh random SPI. A reusable candidate that is
    /// itself checked out right now is skipped rather than waited for —
    /// reuse is an optimization, not a guarantee.
    pub fn checkout_by_config(
        &self,
        peer: &PeerSelector,
    ) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        if self.reuse_ikesa {
            let candidate = self.find_any(|coord| {
                let Some(sa) = coord.sa.as_ref() else {
                    return false;
                };
                if sa.state() == SaState::Deleting {
                    return false;
                }
                if coord.my_id.is_none() && coord.other_id.is_none() {
                    // Neither identity is known yet, so this entry can't
                    // be matched against anything — skip it.
                    return false;
                }
                sa.name() == peer.config_name
                    && identity_matches(coord.my_id.as_deref(), peer.my_id.as_deref())
                    && identity_matches(coord.other_id.as_deref(), peer.other_id.as_deref())
                    && host_matches(coord.other_host, peer.other_host)
                    && host_matches(sa.my_host(), peer.my_host)
            });
            if let Some(entry) = candidate {
                debug!(config = %peer.config_name, "reusing existing ike sa");
                return self.acquire(entry);
            }
        }

        let init_spi = next_spi(&self.rng);
        let id = SaId::new(init_spi, 0, true);
        let entry = self.insert_new_entry(id);
        let sa = self.sa_factory.create(id);
        self.bus.set_current_sa(Some(&sa));
        Ok(self.make_checkout(entry, sa))
    }

    /// `checkout_by_id(unique_id, child)` — scans cached entry state, so
    /// it finds entries regardless of whether they are currently checked
    /// out (see `Coord::unique_id`/`children`).
    pub fn checkout_by_id(
        &self,
        unique_id: u32,
        child: bool,
    ) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let entry = self
            .find_any(|coord| {
                if child {
                    coord.children.iter().any(|c| c.reqid == unique_id)
                } else {
                    coord.unique_id == unique_id
                }
            })
            .ok_or(CheckoutError::NotFound)?;
        self.acquire(entry)
    }

    /// `checkout_by_name(name, child)` — same scan as `checkout_by_id`,
    /// keyed on the SA's or a child's name.
    pub fn checkout_by_name(
        &self,
        name: &str,
        child: bool,
    ) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let entry = self
            .find_any(|coord| {
                if child {
                    coord.children.iter().any(|c| c.name == name)
                } else {
                    coord.name == name
                }
            })
            .ok_or(CheckoutError::NotFound)?;
        self.acquire(entry)
    }

    /// `checkout_duplicate(sa)` — finds another entry sharing `sa`'s
    /// `(my_id, other_id)` pair. Returns `NotFound` if `sa` has not yet
    /// learned both identities.
    pub fn checkout_duplicate(&self, sa: &S) -> Result<Checkout<'_, S, R, H, B>, CheckoutError> {
        let (Some(my_id), Some(other_id)) = (sa.my_id(), sa.other_id()) else {
            return Err(CheckoutError::NotFound);
        };
        let self_id = sa.id();
        let entry = self
            .find_any(|coord| {
                coord.id != self_id
                    && coord.my_id.as_deref() == Some(my_id)
                    && coord.other_id.as_deref() == Some(other_id)
            })
            .ok_or(CheckoutError::NotFound)?;
        self.acquire(entry)
    }

    fn checkin_internal(&self, entry: EntryHandle<S>, sa: S) -> Result<(), CheckinError> {
        let id = sa.id();
        let mut coord = entry.lock();
        if coord.lifecycle == Lifecycle::Dead {
            drop(coord);
            self.bus.set_current_sa(None);
            warn!(%id, "checkin of an sa whose entry no longer exists");
            return Err(CheckinError::NotFound(id));
        }
        coord.id = sa.id();
        coord.other_host = sa.other_host();
        if coord.my_id.is_none() || coord.my_id.as_deref() == Some("%any") {
            coord.my_id = sa.my_id().map(str::to_owned);
        }
        if coord.other_id.is_none() || coord.other_id.as_deref() == Some("%any") {
            coord.other_id = sa.other_id().map(str::to_owned);
        }
        coord.unique_id = sa.unique_id();
        coord.name = sa.name().to_owned();
        coord.children = sa.children().to_vec();
        coord.checked_out = false;
        coord.message_id = None;
        coord.sa = Some(sa);
        drop(coord);
        entry.condvar.notify_one();
        self.bus.set_current_sa(None);
        Ok(())
    }

    /// `checkin(sa)` — releases the lease, refreshing cached fields and
    /// waking one waiter.
    pub fn checkin(&self, checkout: Checkout<'_, S, R, H, B>) -> Result<(), CheckinError> {
        let (entry, sa) = checkout.take();
        self.checkin_internal(entry, sa)
    }

    /// `checkin_and_destroy(sa)` — drains every waiter off the entry, then
    /// removes it from the table and drops it (and the SA) outside any
    /// lock.
    pub fn checkin_and_destroy(
        &self,
        checkout: Checkout<'_, S, R, H, B>,
    ) -> Result<(), CheckinError> {
        let (entry, sa) = checkout.take();
        let id = sa.id();
        self.bus.set_current_sa(Some(&sa));
        {
            let mut coord = entry.lock();
            if coord.lifecycle == Lifecycle::Dead {
                drop(coord);
                self.bus.set_current_sa(None);
                return Err(CheckinError::NotFound(id));
            }
            coord.lifecycle = Lifecycle::Draining;
            entry.condvar.notify_all();
            while coord.waiters > 0 {
                coord = match entry.condvar.wait(coord) {
                    Ok(g) => g,
                    Err(poisoned) => poisoned.into_inner(),
                };
                entry.condvar.notify_all();
            }
            coord.lifecycle = Lifecycle::Dead;
        }
        self.remove_from_table(&entry, id.init_spi);
        self.bus.set_current_sa(None);
        drop(sa);
        debug!(%id, "destroyed ike sa entry");
        Ok(())
    }

    /// `half_open_count(ip)` — counts live, non-checked-out responder
    /// entries in state `Connecting`, optionally filtered by
    /// cached remote address. Advisory: entries currently checked out
    /// cannot be inspected without blocking and are skipped, so the
    /// result is a snapshot, not a globally atomic count.
    pub fn half_open_count(&self, ip: Option<IpAddr>) -> usize {
        let mut cursor = self.create_enumerator();
        let mut count = 0;
        while let Some(entry) = cursor.next() {
            let coord = entry.lock();
            if coord.lifecycle != Lifecycle::Live || coord.id.is_initiator {
                continue;
            }
            let Some(sa) = coord.sa.as_ref() else {
                continue;
            };
            if sa.state() != SaState::Connecting {
                continue;
            }
            if let Some(want) = ip {
                if coord.other_host != Some(want) {
                    continue;
                }
            }
            count += 1;
        }
        count
    }

    /// `create_enumerator()` — raw locking cursor over every entry.
    pub fn create_enumerator(&self) -> Enumerator<'_, S> {
        Enumerator::new(&self.table)
    }

    /// The filtering wrapper over [`Enumerator`]: yields only entries
    /// acquirable without blocking, as ordinary [`Checkout`]s.
    pub fn create_live_enumerator(&self) -> LiveEnumerator<'_, S, R, H, B> {
        LiveEnumerator::new(&self.table, self)
    }

    /// `flush()` — drains and destroys every entry in four passes.
    /// Structural removal (pass 4) happens while every segment mutex is
    /// held; `Sa::delete` and the bus notification (pass 3) are deferred
    /// until after every mutex is released, so the manager never calls
    /// out to SA code while holding a lock — this is what lets the
    /// manager use a plain, non-recursive `Mutex` (see `segment.rs`).
    pub fn flush(&self) {
        let mut guards: Vec<_> = self.table.segments.iter().map(lock_segment).collect();

        // Pass 1: no new checkout may succeed.
        for guard in &guards {
            for row in &guard.rows {
                for entry in row {
                    let mut c = entry.lock();
                    if c.lifecycle == Lifecycle::Live {
                        c.lifecycle = Lifecycle::Draining;
                    }
                }
            }
        }

        // Pass 2: every waiter wakes and leaves empty-handed.
        for guard in &guards {
            for row in &guard.rows {
                for entry in row {
                    let mut c = entry.lock();
                    entry.condvar.notify_all();
                    while c.waiters > 0 {
                        c = match entry.condvar.wait(c) {
                            Ok(g) => g,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        entry.condvar.notify_all();
                    }
                }
            }
        }

        // Pass 4 (structural half): unlink every entry from its row while
        // every segment mutex is still held.
        let mut removed = Vec::new();
        for guard in guards.iter_mut() {
            for row in guard.rows.iter_mut() {
                removed.extend(row.drain(..));
            }
            guard.count = 0;
        }
        drop(guards);

        // Pass 3: publish and delete, outside every lock.
        for entry in &removed {
            let mut c = entry.lock();
            if let Some(sa) = c.sa.as_mut() {
                self.bus.set_current_sa(Some(sa));
                sa.delete();
            }
            c.lifecycle = Lifecycle::Dead;
        }
        self.bus.set_current_sa(None);
        debug!(count = removed.len(), "flushed ike sa table");
        // `removed` drops here: each entry (and its SA) is destroyed
        // exactly once.
    }
}

impl<S: Sa> Manager<S, DefaultRng, DefaultHasher, NoopBus> {
    /// Convenience constructor for embedders that don't need to
    /// substitute their own RNG, hasher, or telemetry bus.
    pub fn with_defaults(config: &ManagerConfig, sa_factory: impl SaFactory<S>) -> Self {
        Manager::new(config, sa_factory, DefaultRng, DefaultHasher, NoopBus)
    }
}

impl<S: Sa, R: Rng, H: Hasher, B: Bus> Drop for Manager<S, R, H, B> {
    /// Flushes (idempotent if already empty) before the table, RNG, and
    /// hasher are dropped normally.
    fn drop(&mut self) {
        self.flush();
    }
}
