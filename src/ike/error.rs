// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use thiserror::Error;

use crate::ike::sa_id::SaId;

/// Failure of any `checkout_*` operation. A rejected checkout is the
/// normal way the manager declines service, not an exceptional condition
/// — callers are expected to drop the inbound message and move on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("entry driven out by an administrative flush")]
    DrivenOut,
    #[error("message suppressed as a retransmit of one already in flight")]
    Retransmit,
    #[error("no matching entry")]
    NotFound,
}

/// Failure of `checkin`/`checkin_and_destroy`: the SA handle being
/// returned is not registered in the table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckinError {
    #[error("no registered entry for {0}")]
    NotFound(SaId),
}

/// Failure to construct a [`crate::ike::manager::Manager`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerBuildError {
    #[error("no hasher available")]
    MissingHasher,
    #[error("no RNG available")]
    MissingRng,
}
