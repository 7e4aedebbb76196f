// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use ikesa_manager::{cfg::config::ManagerConfig, ike::manager::Manager};

use crate::common::mock_sa::MockFactory;

/// A thread that checks out an entry and holds it briefly blocks a
/// second thread waiting on the same id; the waiter only wakes once the
/// first thread checks the entry back in.
#[test]
fn checkout_blocks_until_checked_back_in() {
    let (factory, _deletes) = MockFactory::new();
    let config = ManagerConfig { table_size: 16, table_segments: 4, reuse_ikesa: false };
    let mgr = Arc::new(Manager::with_defaults(&config, factory));

    let first = mgr.checkout_new(true).unwrap();
    let id = first.id();

    let released = Arc::new(AtomicBool::new(false));
    let waiter = {
        let mgr = mgr.clone();
        let released = released.clone();
        thread::spawn(move || {
            let checkout = mgr.checkout(id).expect("entry exists");
            // The holder must have released it before this returns.
            assert!(released.load(Ordering::SeqCst));
            mgr.checkin(checkout).unwrap();
        })
    };

    thread::sleep(Duration::from_millis(50));
    released.store(true, Ordering::SeqCst);
    mgr.checkin(first).unwrap();

    waiter.join().unwrap();
}

/// Two checked-in SAs sharing an identity pair are discoverable from one
/// another via `checkout_duplicate`, even when concurrent unrelated
/// traffic is registering other entries at the same time.
#[test]
fn checkout_duplicate_under_concurrent_traffic() {
    let (factory, _deletes) = MockFactory::new();
    let config = ManagerConfig { table_size: 64, table_segments: 8, reuse_ikesa: false };
    let mgr = Arc::new(Manager::with_defaults(&config, factory));

    let mut a = mgr.checkout_new(true).unwrap();
    a.state.my_id = Some("alice".into());
    a.state.other_id = Some("bob".into());
    let a_id = a.id();
    mgr.checkin(a).unwrap();

    let mut b = mgr.checkout_new(true).unwrap();
    b.state.my_id = Some("alice".into());
    b.state.other_id = Some("bob".into());
    let b_id = b.id();
    mgr.checkin(b).unwrap();

    let noise: Vec<_> = (0..8)
        .map(|i| {
            let mgr = mgr.clone();
            thread::spawn(move || {
                let mut c = mgr.checkout_new(true).unwrap();
                c.state.my_id = Some(format!("noise-{i}"));
                c.state.other_id = Some("someone-else".into());
                mgr.checkin(c).unwrap();
            })
        })
        .collect();
    for h in noise {
        h.join().unwrap();
    }

    let a = mgr.checkout(a_id).expect("entry still registered");
    let dup = mgr.checkout_duplicate(&*a).expect("finds the matching peer");
    assert_eq!(dup.id(), b_id);
    mgr.checkin(dup).unwrap();
    mgr.checkin(a).unwrap();
}
