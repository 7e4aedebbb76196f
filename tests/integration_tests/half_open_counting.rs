// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    sync::{Arc, Barrier},
    thread,
};

use ikesa_manager::{
    cfg::config::ManagerConfig,
    ike::{collaborators::SaState, manager::Manager},
};

use crate::common::mock_sa::MockFactory;

/// Several threads concurrently register half-open responder SAs across
/// two remote hosts plus a handful of non-half-open entries (initiator
/// role, or past the `Connecting` state). `half_open_count` must count
/// only the former, both unfiltered and filtered by host.
#[test]
fn half_open_count_is_accurate_under_concurrent_registration() {
    let (factory, _deletes) = MockFactory::new();
    let config = ManagerConfig { table_size: 128, table_segments: 8, reuse_ikesa: false };
    let mgr = Arc::new(Manager::with_defaults(&config, factory));

    let host_a: std::net::IpAddr = "192.0.2.1".parse().unwrap();
    let host_b: std::net::IpAddr = "192.0.2.2".parse().unwrap();

    const PER_HOST: usize = 6;
    const WORKERS: usize = PER_HOST * 2 + 4;
    let barrier = Arc::new(Barrier::new(WORKERS));

    let mut handles = Vec::new();
    for i in 0..WORKERS {
        let mgr = mgr.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            if i < PER_HOST {
                let mut c = mgr.checkout_new(false).unwrap();
                c.state.other_host = Some(host_a);
                mgr.checkin(c).unwrap();
            } else if i < PER_HOST * 2 {
                let mut c = mgr.checkout_new(false).unwrap();
                c.state.other_host = Some(host_b);
                mgr.checkin(c).unwrap();
            } else if i < PER_HOST * 2 + 2 {
                // Initiator role: never counts as half-open.
                let mut c = mgr.checkout_new(true).unwrap();
                c.state.other_host = Some(host_a);
                mgr.checkin(c).unwrap();
            } else {
                // Responder, but already past the connecting state.
                let mut c = mgr.checkout_new(false).unwrap();
                c.state.other_host = Some(host_a);
                c.state.state = SaState::Established;
                mgr.checkin(c).unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(mgr.half_open_count(None), PER_HOST * 2);
    assert_eq!(mgr.half_open_count(Some(host_a)), PER_HOST);
    assert_eq!(mgr.half_open_count(Some(host_b)), PER_HOST);
    assert_eq!(mgr.half_open_count(Some("192.0.2.3".parse().unwrap())), 0);
}
