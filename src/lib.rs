// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Concurrent registry of IKE Security Associations.
//!
//! See [`ike::manager::Manager`] for the main entry point.

pub mod cfg;
pub mod ike;
