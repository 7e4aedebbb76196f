// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use ikesa_manager::{cfg::config::ManagerConfig, ike::manager::Manager};

use crate::common::mock_sa::MockFactory;

const WORKERS: usize = 16;
const ITERS_PER_WORKER: usize = 50;

/// Sixteen workers continuously create and check SAs back in while a
/// seventeenth thread repeatedly flushes the table. `Sa::delete` must
/// never be called twice for the same SA, no matter how the flush
/// passes interleave with live checkouts.
#[test]
fn concurrent_flush_never_double_destroys() {
    let (factory, deletes) = MockFactory::new();
    let config = ManagerConfig { table_size: 64, table_segments: 8, reuse_ikesa: false };
    let mgr = Arc::new(Manager::with_defaults(&config, factory));
    let created = Arc::new(AtomicUsize::new(0));

    let flusher = {
        let mgr = mgr.clone();
        thread::spawn(move || {
            for _ in 0..20 {
                mgr.flush();
                thread::yield_now();
            }
        })
    };

    let workers: Vec<_> = (0..WORKERS)
        .map(|_| {
            let mgr = mgr.clone();
            let created = created.clone();
            thread::spawn(move || {
                for _ in 0..ITERS_PER_WORKER {
                    let checkout = mgr.checkout_new(true).expect("checkout_new never fails");
                    created.fetch_add(1, Ordering::SeqCst);
                    // Ignore the result: a concurrent flush may have
                    // already evicted this entry before it was checked
                    // back in.
                    let _ = mgr.checkin(checkout);
                }
            })
        })
        .collect();

    for w in workers {
        w.join().unwrap();
    }
    flusher.join().unwrap();

    // Drain whatever is still live.
    mgr.flush();
    let total_created = created.load(Ordering::SeqCst);
    let total_deleted = deletes.load(Ordering::SeqCst);
    assert!(
        total_deleted <= total_created,
        "delete() called more times ({total_deleted}) than entries were created ({total_created})"
    );

    // Idempotent: nothing left to destroy a second time.
    mgr.flush();
    assert_eq!(deletes.load(Ordering::SeqCst), total_deleted);
}
