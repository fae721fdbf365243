// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session establishment.
//!
//! An external identity step redirects the browser here with a signed
//! token in the query string. A valid token becomes the session cookie;
//! anything else bounces back to the login page with an error indicator.

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    session::{cookie::session_cookie, verify::verify_token},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReceiveQuery {
    /// Signed token issued by the external identity step.
    pub token: Option<String>,
}

/// Outcome of session establishment, made explicit instead of relying on
/// framework-level short-circuiting.
#[derive(Debug)]
pub enum AuthOutcome {
    RedirectTo(&'static str),
    SetCookieAndRedirect(::cookie::Cookie<'static>, &'static str),
}

impl IntoResponse for AuthOutcome {
    fn into_response(self) -> Response {
        match self {
            AuthOutcome::RedirectTo(path) => Redirect::to(path).into_response(),
            AuthOutcome::SetCookieAndRedirect(cookie, path) => {
                ([(SET_COOKIE, cookie.to_string())], Redirect::to(path)).into_response()
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/auth/receive",
    params(ReceiveQuery),
    tag = "Auth",
    responses(
        (status = 303, description = "Session established and redirected by role, or bounced to login with an error indicator")
    )
)]
pub async fn receive(
    State(state): State<AppState>,
    Query(query): Query<ReceiveQuery>,
) -> AuthOutcome {
    let Some(token) = query.token else {
        return AuthOutcome::RedirectTo("/login?error=missing_token");
    };

    match verify_token(&token, &state.config.session_secret) {
        None => AuthOutcome::RedirectTo("/login?error=invalid_token"),
        Some(claims) => {
            let destination = if claims.is_admin {
                "/admin/dashboard"
            } else {
                "/"
            };
            AuthOutcome::SetCookieAndRedirect(
                session_cookie(&token, state.config.secure_cookies),
                destination,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::http::{header::LOCATION, StatusCode};
    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use url::Url;

    use crate::{
        config::{AppConfig, RoutePolicy},
        session::SessionClaims,
        tenant::TenantStrategy,
    };

    const SECRET: &str = "test-secret";

    fn test_state() -> AppState {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            session_secret: SECRET.to_string(),
            tenant_secret: "test-hmac-secret".to_string(),
            backend_base_url: Url::parse("http://127.0.0.1:9/api/v1").unwrap(),
            backend_timeout: Duration::from_secs(1),
            tenant_strategy: TenantStrategy::FixedDomain("acme.example.com".to_string()),
            routes: RoutePolicy::new(vec!["/admin".to_string()], vec!["/account".to_string()]),
            secure_cookies: false,
        };
        AppState::new(config).expect("test state builds")
    }

    fn mint_token(email: &str, is_admin: bool) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            email: email.to_string(),
            is_admin,
            iat: now,
            exp: now + 3600,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token encodes")
    }

    #[tokio::test]
    async fn missing_token_redirects_to_login_with_indicator() {
        let response = receive(State(test_state()), Query(ReceiveQuery { token: None }))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login?error=missing_token");
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn invalid_token_redirects_to_login_with_indicator() {
        let response = receive(
            State(test_state()),
            Query(ReceiveQuery {
                token: Some("not-a-token".to_string()),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login?error=invalid_token");
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn valid_user_token_sets_cookie_and_redirects_home() {
        let token = mint_token("a@b.com", false);
        let response = receive(
            State(test_state()),
            Query(ReceiveQuery {
                token: Some(token.clone()),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");

        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with(&format!("jwt={token}")));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn valid_admin_token_redirects_to_the_admin_dashboard() {
        let token = mint_token("a@b.com", true);
        let response = receive(
            State(test_state()),
            Query(ReceiveQuery { token: Some(token) }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/admin/dashboard");
        assert!(response.headers().get(SET_COOKIE).is_some());
    }
}
