// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    sync::{Arc, Barrier},
    thread,
};

use ikesa_manager::{
    cfg::config::ManagerConfig,
    ike::{
        collaborators::InboundMessage,
        error::CheckoutError,
        manager::Manager,
        sa_id::SaId,
    },
};

use crate::common::mock_sa::MockFactory;

/// Several threads race to check out the same IKE_SA_INIT request
/// (same packet bytes, same declared id). Exactly one may create the
/// entry; every other concurrent attempt must see it as a retransmit,
/// never as a second fresh entry.
#[test]
fn concurrent_identical_ike_sa_init_creates_one_entry() {
    let (factory, _deletes) = MockFactory::new();
    let config = ManagerConfig { table_size: 64, table_segments: 8, reuse_ikesa: true };
    let mgr = Arc::new(Manager::with_defaults(&config, factory));

    let msg = InboundMessage {
        sa_id: SaId::new(0x1122_3344_5566_7788, 0, true),
        is_ike_sa_init_request: true,
        is_request: true,
        message_id: 0,
        packet_bytes: b"identical ike_sa_init packet".to_vec(),
    };

    const WORKERS: usize = 8;
    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let mgr = mgr.clone();
            let msg = msg.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                mgr.checkout_by_message(&msg)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let created = results.iter().filter(|r| r.is_ok()).count();
    let suppressed = results
        .iter()
        .filter(|r| matches!(r, Err(CheckoutError::Retransmit)))
        .count();

    assert_eq!(created, 1, "exactly one worker should create the entry");
    assert_eq!(suppressed, WORKERS - 1, "every other worker must see a retransmit");

    for r in results {
        if let Ok(checkout) = r {
            mgr.checkin(checkout).unwrap();
        }
    }
}
