// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route guard middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{error::ApiError, state::AppState};

use super::verify::session_from_headers;

/// Gate every inbound request before it reaches a handler.
///
/// The decision order is fixed: exempt paths pass without touching the
/// verifier, admin prefixes are checked before general protected prefixes
/// (a path in both sets is governed by the admin rule), and anything
/// unmatched is public. Unauthenticated access to a protected `/api/` path
/// gets a structured 401 instead of an interactive redirect.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let policy = &state.config.routes;

    if policy.is_exempt(&path) {
        return next.run(request).await;
    }

    let claims = session_from_headers(request.headers(), &state.config.session_secret);

    if policy.requires_admin(&path) {
        return match claims {
            Some(claims) if claims.is_admin => {
                request.extensions_mut().insert(claims);
                next.run(request).await
            }
            _ => Redirect::to("/login?role=admin").into_response(),
        };
    }

    if policy.requires_session(&path) {
        return match claims {
            Some(claims) if claims.has_identity() => {
                tracing::debug!(email = %claims.email, %path, "session accepted");
                request.extensions_mut().insert(claims);
                next.run(request).await
            }
            _ if is_api_path(&path) => {
                ApiError::unauthorized("Authentication required").into_response()
            }
            _ => Redirect::to("/login").into_response(),
        };
    }

    // Public path; claims still ride along for handlers that personalize.
    if let Some(claims) = claims {
        request.extensions_mut().insert(claims);
    }
    next.run(request).await
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api/")
}
