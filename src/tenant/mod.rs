// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Tenant Identity
//!
//! Every proxied request is attributed to a tenant domain. This module
//! decides which domain a request belongs to (`resolver`) and produces the
//! keyed digest that attests that domain to the platform API (`signer`).

pub mod resolver;
pub mod signer;

pub use resolver::{TenantError, TenantStrategy};
pub use signer::TenantSigner;
