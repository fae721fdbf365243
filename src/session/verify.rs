// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token verification.

use axum::http::{header::COOKIE, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::claims::SessionClaims;
use super::cookie::SESSION_COOKIE;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Verify a raw session token against the configured secret.
///
/// Every failure mode (malformed structure, bad signature, expiry)
/// collapses to `None`: "no valid session" is an expected state for the
/// route guard, not an error to propagate. The rejection reason is logged;
/// the token contents are not.
pub fn verify_token(token: &str, secret: &str) -> Option<SessionClaims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;
    validation.validate_aud = false;

    match decode::<SessionClaims>(token, &key, &validation) {
        Ok(data) => Some(data.claims),
        Err(err) => {
            tracing::debug!(reason = %err, "session token rejected");
            None
        }
    }
}

/// Extract and verify the session from a request's `Cookie` header.
///
/// An absent or unparsable cookie is simply "no session".
pub fn session_from_headers(headers: &HeaderMap, secret: &str) -> Option<SessionClaims> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    let token = session_token(raw)?;
    verify_token(&token, secret)
}

fn session_token(cookie_header: &str) -> Option<String> {
    ::cookie::Cookie::split_parse(cookie_header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}
