// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Authentication
//!
//! The browser session is a compact signed token (JWT) carried in an
//! `HttpOnly` cookie.
//!
//! ## Flow
//!
//! 1. An external identity step hands the signed token to `/auth/receive`
//! 2. The gateway verifies it and sets the `jwt` session cookie
//! 3. The route guard re-verifies the cookie on every gated request and
//!    classifies the path against the admin/protected route sets
//!
//! ## Security
//!
//! - Verification failures collapse to "no session"; the rejection reason
//!   is logged, token contents are not
//! - Clock skew tolerance is 60 seconds
//! - The cookie is `HttpOnly`, `SameSite=Lax`, and `Secure` in production

pub mod claims;
pub mod cookie;
pub mod guard;
pub mod verify;

pub use claims::SessionClaims;
