// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Thin proxy handlers in front of the platform API.
//!
//! Each handler forwards the browser's request through the signed
//! forwarder and translates the outcome: backend rejections keep their
//! status inside the `{"error": ...}` envelope, transport failures become
//! a generic 500, and requests whose tenant cannot be resolved a 400.

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::{
    backend::{BackendError, ForwardOptions},
    error::ApiError,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "Hello",
    responses((status = 200, description = "Greeting payload from the backend"))
)]
pub async fn hello(State(state): State<AppState>, headers: HeaderMap) -> Response {
    proxy(
        &state,
        Method::GET,
        "/hello",
        &headers,
        None,
        "Failed to fetch data from backend",
    )
    .await
}

#[utoipa::path(
    get,
    path = "/api/todo_lists",
    tag = "Todo Lists",
    responses((status = 200, description = "Todo lists for the tenant"))
)]
pub async fn list_todo_lists(State(state): State<AppState>, headers: HeaderMap) -> Response {
    proxy(
        &state,
        Method::GET,
        "/todo_lists/",
        &headers,
        None,
        "Failed to fetch todo_lists",
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/todo_lists",
    tag = "Todo Lists",
    responses((status = 201, description = "Created todo list"))
)]
pub async fn create_todo_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    proxy(
        &state,
        Method::POST,
        "/todo_lists/",
        &headers,
        Some(body),
        "Failed to create todo_list",
    )
    .await
}

#[utoipa::path(
    get,
    path = "/api/todo_items",
    tag = "Todo Items",
    responses((status = 200, description = "Todo items for the tenant"))
)]
pub async fn list_todo_items(State(state): State<AppState>, headers: HeaderMap) -> Response {
    proxy(
        &state,
        Method::GET,
        "/todo_items/",
        &headers,
        None,
        "Failed to fetch todo_items",
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/todo_items",
    tag = "Todo Items",
    responses((status = 201, description = "Created todo item"))
)]
pub async fn create_todo_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    proxy(
        &state,
        Method::POST,
        "/todo_items/",
        &headers,
        Some(body),
        "Failed to create todo_item",
    )
    .await
}

async fn proxy(
    state: &AppState,
    method: Method,
    path: &str,
    inbound: &HeaderMap,
    body: Option<Value>,
    failure_message: &str,
) -> Response {
    let result = state
        .backend
        .forward(method, path, inbound, body.as_ref(), ForwardOptions::default())
        .await;

    let response = match result {
        Ok(response) => response,
        Err(BackendError::Tenant(err)) => {
            return ApiError::bad_request(err.to_string()).into_response();
        }
        Err(_) => return ApiError::internal_server_error().into_response(),
    };

    let status = response.status();
    let payload: Value = match response.json().await {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(path, %status, error = %err, "backend returned an unreadable body");
            return ApiError::internal_server_error().into_response();
        }
    };

    translate(status, payload, path, failure_message)
}

/// Turn a backend response into the client-facing one: success passes
/// through, rejections are re-wrapped in the error envelope with the
/// backend's status preserved.
fn translate(
    status: StatusCode,
    payload: Value,
    path: &str,
    failure_message: &str,
) -> Response {
    if !status.is_success() {
        let detail = payload
            .get("detail")
            .and_then(Value::as_str)
            .unwrap_or(failure_message)
            .to_string();
        tracing::warn!(path, %status, "backend rejected proxied request");
        return ApiError::new(status, detail).into_response();
    }

    (status, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::to_bytes;
    use serde_json::json;
    use url::Url;

    use crate::{
        config::{AppConfig, RoutePolicy},
        tenant::TenantStrategy,
    };

    fn test_state(strategy: TenantStrategy) -> AppState {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            session_secret: "test-secret".to_string(),
            tenant_secret: "test-hmac-secret".to_string(),
            // Nothing listens here; transport-level tests rely on the
            // connection being refused immediately.
            backend_base_url: Url::parse("http://127.0.0.1:9/api/v1").unwrap(),
            backend_timeout: Duration::from_secs(1),
            tenant_strategy: strategy,
            routes: RoutePolicy::new(vec![], vec![]),
            secure_cookies: false,
        };
        AppState::new(config).expect("test state builds")
    }

    #[tokio::test]
    async fn unresolvable_tenant_is_a_client_error() {
        let state = test_state(TenantStrategy::HostHeader);
        let response = list_todo_lists(State(state), HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert!(payload["error"]
            .as_str()
            .unwrap()
            .contains("tenant domain could not be resolved"));
    }

    #[tokio::test]
    async fn transport_failure_is_a_generic_500() {
        let state = test_state(TenantStrategy::FixedDomain("acme.example.com".to_string()));
        let response = hello(State(state), HeaderMap::new()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, r#"{"error":"Internal Server Error"}"#.as_bytes());
    }

    #[tokio::test]
    async fn backend_rejection_keeps_its_status_and_detail() {
        let response = translate(
            StatusCode::FORBIDDEN,
            json!({"detail": "Invalid tenant signature"}),
            "/todo_lists/",
            "Failed to fetch todo_lists",
        );

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, r#"{"error":"Invalid tenant signature"}"#.as_bytes());
    }

    #[tokio::test]
    async fn backend_rejection_without_detail_uses_the_generic_message() {
        let response = translate(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"message": "something else"}),
            "/todo_lists/",
            "Failed to create todo_list",
        );

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, r#"{"error":"Failed to create todo_list"}"#.as_bytes());
    }

    #[tokio::test]
    async fn successful_backend_payload_passes_through() {
        let payload = json!([{"id": 1, "title": "groceries"}]);
        let response = translate(
            StatusCode::OK,
            payload.clone(),
            "/todo_lists/",
            "Failed to fetch todo_lists",
        );

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let echoed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(echoed, payload);
    }

    #[tokio::test]
    async fn created_status_passes_through() {
        let response = translate(
            StatusCode::CREATED,
            json!({"id": 2}),
            "/todo_lists/",
            "Failed to create todo_list",
        );
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
