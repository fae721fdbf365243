// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session cookie construction.

use ::cookie::{time::Duration, Cookie, SameSite};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "jwt";

/// Session lifetime granted at establishment (one hour).
pub const SESSION_TTL_SECS: i64 = 60 * 60;

/// Build the session cookie set during session establishment.
///
/// `secure` follows the deployment environment: browsers only send the
/// cookie over HTTPS when it is set.
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(SESSION_TTL_SECS))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_the_session_attributes() {
        let rendered = session_cookie("token-value", false).to_string();
        assert!(rendered.starts_with("jwt=token-value"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=3600"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn cookie_is_secure_in_production() {
        let rendered = session_cookie("token-value", true).to_string();
        assert!(rendered.contains("Secure"));
    }
}
