// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Browser-facing pages.
//!
//! Presentation is intentionally minimal; these handlers exist so the
//! routes the guard classifies are real endpoints. The marketing content
//! itself ships separately.

use axum::response::Html;

pub async fn landing() -> Html<&'static str> {
    Html(
        "<!doctype html>\
         <html><head><title>Relational Portal</title></head>\
         <body><h1>Relational Portal</h1>\
         <p>One workspace for every tenant.</p>\
         <a href=\"/login\">Sign in</a></body></html>",
    )
}

pub async fn login() -> Html<&'static str> {
    Html(
        "<!doctype html>\
         <html><head><title>Sign in</title></head>\
         <body><h1>Sign in</h1>\
         <p>Continue with your workspace identity provider.</p></body></html>",
    )
}

pub async fn admin_dashboard() -> Html<&'static str> {
    Html(
        "<!doctype html>\
         <html><head><title>Admin</title></head>\
         <body><h1>Admin dashboard</h1></body></html>",
    )
}
