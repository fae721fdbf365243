// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Keyed tenant signature shared with the platform API.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the tenant attestation digest sent alongside proxied requests.
///
/// The digest is HMAC-SHA256 over the tenant domain alone: no nonce, no
/// timestamp. The same (secret, domain) pair always yields the same
/// signature, so the digest identifies the tenant but does not prove
/// freshness; replay protection is the backend's responsibility. Changing
/// this would break the verification contract on the other side.
#[derive(Clone)]
pub struct TenantSigner {
    secret: String,
}

impl TenantSigner {
    /// The secret must be non-empty; configuration enforces this before the
    /// process starts serving.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// HMAC-SHA256 over the UTF-8 bytes of `domain`, as lowercase hex.
    pub fn sign(&self, domain: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(domain.as_bytes());
        hex_digest(&mac.finalize().into_bytes())
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}
