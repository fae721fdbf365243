// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session claims carried by a verified token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded payload of a verified session token.
///
/// Reconstructed per request from the signed cookie; never persisted
/// server-side. Owned by the request that decoded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User identity key.
    pub email: String,

    /// Authorization flag for the admin area.
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,

    /// Issued-at timestamp (unix seconds).
    #[serde(default)]
    pub iat: i64,

    /// Expiry timestamp (unix seconds). Enforced during verification.
    pub exp: i64,
}

impl SessionClaims {
    /// A session counts as authenticated only when it names an identity.
    pub fn has_identity(&self) -> bool {
        !self.email.is_empty()
    }

    /// Expiry as a UTC timestamp, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
