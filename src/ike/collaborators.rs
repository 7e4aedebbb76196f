// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::net::IpAddr;

use rand::Rng as _;

use crate::ike::sa_id::SaId;

/// Lifecycle state of an SA handle, as reported by [`Sa::state`].
///
/// `Connecting` and `Deleting` are named explicitly by the manager's
/// contract (half-open counting and `checkout_by_config`'s reuse filter);
/// `Established`/`Rekeying` round out the state machine so embedders have
/// somewhere to put the rest of their states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaState {
    Connecting,
    Established,
    Rekeying,
    Deleting,
}

/// A child SA, as exposed through [`Sa::children`] for `checkout_by_id`/
/// `checkout_by_name`'s child-scoped lookups.
#[derive(Debug, Clone)]
pub struct ChildSa {
    pub reqid: u32,
    pub name: String,
}

/// The slice of a parsed inbound message `checkout_by_message` needs: its
/// declared SA-id (as the sender sees it — the manager looks it up under
/// the switched role), whether it is an IKE_SA_INIT request, whether it is
/// a request at all (vs. a response), the message id, and — only needed
/// for IKE_SA_INIT — the raw packet bytes to hash for retransmit
/// detection.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sa_id: SaId,
    pub is_ike_sa_init_request: bool,
    pub is_request: bool,
    pub message_id: u32,
    pub packet_bytes: Vec<u8>,
}

/// The peer-matching key `checkout_by_config` reuses an existing SA
/// against: configuration name plus the four-tuple of host/identity
/// fields the source keys reuse on. `%any` on either identity field is
/// treated as a wildcard on the stored side, and `None` hosts are treated
/// as a wildcard address.
#[derive(Debug, Clone, Default)]
pub struct PeerSelector {
    pub config_name: String,
    pub my_id: Option<String>,
    pub other_id: Option<String>,
    pub my_host: Option<IpAddr>,
    pub other_host: Option<IpAddr>,
}

/// The contract the manager requires of an IKE SA handle. The manager never
/// inspects an `S` beyond these methods, and never reenters the manager
/// from any of them (see `Sa::delete`'s documentation).
pub trait Sa: Send + Sync + 'static {
    fn id(&self) -> SaId;

    /// Called on `checkin`: the SPI may have changed while checked out
    /// (e.g. the responder SPI was learned), this applies the current
    /// value to the entry's cached id.
    fn set_id(&mut self, id: SaId);

    fn state(&self) -> SaState;

    fn unique_id(&self) -> u32;

    fn name(&self) -> &str;

    fn my_id(&self) -> Option<&str>;

    fn other_id(&self) -> Option<&str>;

    fn my_host(&self) -> Option<IpAddr>;

    fn other_host(&self) -> Option<IpAddr>;

    fn children(&self) -> &[ChildSa];

    /// Initiates deletion. Called only from [`crate::ike::manager::Manager::flush`]
    /// while every segment mutex is held — implementations must not call
    /// back into the manager from here.
    fn delete(&mut self);
}

/// Builds a fresh `S` for a newly assigned [`SaId`].
pub trait SaFactory<S: Sa>: Send + Sync + 'static {
    fn create(&self, id: SaId) -> S;
}

/// Random-byte source for fresh SPIs, used only while a segment mutex is
/// held — implementations must be safe to call from multiple threads
/// without external synchronization, but need not be lock-free.
pub trait Rng: Send + Sync + 'static {
    fn fill(&self, buf: &mut [u8]);
}

/// Cryptographic digest used to detect IKE_SA_INIT retransmits. Any
/// fixed-length, deterministic digest satisfies the contract; the
/// algorithm is not prescribed.
pub trait Hasher: Send + Sync + 'static {
    fn digest(&self, bytes: &[u8]) -> Vec<u8>;
}

/// Telemetry edge: notified with the SA a thread is about to act on, and
/// with `None` when a thread is done. `Any` erasure keeps the manager
/// generic over `S` without forcing every `Bus` implementation to be
/// generic too.
pub trait Bus: Send + Sync + 'static {
    fn set_current_sa(&self, sa: Option<&dyn std::any::Any>);
}

/// Default [`Rng`] backed by `rand::rng()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRng;

impl Rng for DefaultRng {
    fn fill(&self, buf: &mut [u8]) {
        rand::rng().fill(buf);
    }
}

/// Draws a non-zero random SPI, re-rolling on the vanishingly unlikely
/// all-zero draw since zero is the "unassigned" sentinel.
pub fn next_spi<R: Rng + ?Sized>(rng: &R) -> u64 {
    loop {
        let mut buf = [0u8; 8];
        rng.fill(&mut buf);
        let spi = u64::from_be_bytes(buf);
        if spi != 0 {
            return spi;
        }
    }
}

/// Default [`Hasher`] backed by MD5. Any fixed-length digest satisfies the
/// contract — embedders needing cryptographic strength supply their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHasher;

impl Hasher for DefaultHasher {
    fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        use md5::{Digest, Md5};
        let mut hasher = Md5::new();
        hasher.update(bytes);
        hasher.finalize().to_vec()
    }
}

/// A [`Bus`] that discards every notification, for embedders with no
/// telemetry layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBus;

impl Bus for NoopBus {
    fn set_current_sa(&self, _sa: Option<&dyn std::any::Any>) {}
}
