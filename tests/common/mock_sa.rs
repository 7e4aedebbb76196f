// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Shared mock `Sa`/`SaFactory` for the integration suite, distinct from
//! the crate's own internal mocks (each compiles into a separate test
//! binary and cannot see the other's private `#[cfg(test)]` items).

use std::{
    net::IpAddr,
    sync::{
        Arc,
        atomic::{AtomicU32, AtomicUsize, Ordering},
    },
};

use ikesa_manager::ike::{
    collaborators::{ChildSa, Sa, SaFactory, SaState},
    sa_id::SaId,
};

#[derive(Debug, Clone)]
pub struct MockSaState {
    pub id: SaId,
    pub state: SaState,
    pub unique_id: u32,
    pub name: String,
    pub my_id: Option<String>,
    pub other_id: Option<String>,
    pub my_host: Option<IpAddr>,
    pub other_host: Option<IpAddr>,
    pub children: Vec<ChildSa>,
}

impl Default for MockSaState {
    fn default() -> Self {
        MockSaState {
            id: SaId::new(0, 0, true),
            state: SaState::Connecting,
            unique_id: 0,
            name: String::new(),
            my_id: None,
            other_id: None,
            my_host: None,
            other_host: None,
            children: Vec::new(),
        }
    }
}

pub struct MockSa {
    pub state: MockSaState,
    pub deletes: Arc<AtomicUsize>,
}

impl Sa for MockSa {
    fn id(&self) -> SaId {
        self.state.id
    }

    fn set_id(&mut self, id: SaId) {
        self.state.id = id;
    }

    fn state(&self) -> SaState {
        self.state.state
    }

    fn unique_id(&self) -> u32 {
        self.state.unique_id
    }

    fn name(&self) -> &str {
        &self.state.name
    }

    fn my_id(&self) -> Option<&str> {
        self.state.my_id.as_deref()
    }

    fn other_id(&self) -> Option<&str> {
        self.state.other_id.as_deref()
    }

    fn my_host(&self) -> Option<IpAddr> {
        self.state.my_host
    }

    fn other_host(&self) -> Option<IpAddr> {
        self.state.other_host
    }

    fn children(&self) -> &[ChildSa] {
        &self.state.children
    }

    fn delete(&mut self) {
        self.deletes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counts every `Sa::delete` call across every SA it ever created, so a
/// test can assert flush/destroy never double-invokes it.
pub struct MockFactory {
    pub deletes: Arc<AtomicUsize>,
    next_unique_id: AtomicU32,
}

impl MockFactory {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let deletes = Arc::new(AtomicUsize::new(0));
        (MockFactory { deletes: deletes.clone(), next_unique_id: AtomicU32::new(1) }, deletes)
    }
}

impl SaFactory<MockSa> for MockFactory {
    fn create(&self, id: SaId) -> MockSa {
        MockSa {
            state: MockSaState {
                id,
                unique_id: self.next_unique_id.fetch_add(1, Ordering::SeqCst),
                ..Default::default()
            },
            deletes: self.deletes.clone(),
        }
    }
}
