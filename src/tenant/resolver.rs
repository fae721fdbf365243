// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tenant domain resolution.

use axum::http::{header::HOST, HeaderMap};

/// How the tenant domain for a request is determined.
///
/// Exactly one strategy is active per deployment, selected by
/// configuration; the strategies are never mixed within a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantStrategy {
    /// Single-tenant deployment pinned to one configured domain.
    FixedDomain(String),
    /// Derive the domain from the inbound `Host` header.
    HostHeader,
    /// The caller supplies the domain explicitly per request.
    Override,
}

/// A request whose tenant cannot be determined is a client/request error,
/// not a configuration error: it maps to a 400-class response.
#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("tenant domain could not be resolved: {0}")]
    Unresolved(&'static str),
}

impl TenantStrategy {
    /// Resolve the tenant domain for one request.
    ///
    /// `override_domain` is only honored by the `Override` strategy; the
    /// other strategies ignore it rather than silently mixing sources.
    pub fn resolve(
        &self,
        headers: &HeaderMap,
        override_domain: Option<&str>,
    ) -> Result<String, TenantError> {
        match self {
            TenantStrategy::FixedDomain(domain) => Ok(domain.clone()),
            TenantStrategy::HostHeader => headers
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .map(strip_port)
                .filter(|host| !host.is_empty())
                .map(str::to_owned)
                .ok_or(TenantError::Unresolved("request carries no Host header")),
            TenantStrategy::Override => override_domain
                .map(str::trim)
                .filter(|domain| !domain.is_empty())
                .map(str::to_owned)
                .ok_or(TenantError::Unresolved("no tenant override supplied")),
        }
    }
}

/// The signed domain must match what the backend expects, so a `:port`
/// suffix from local or non-standard deployments is stripped.
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
