// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{session::guard::require_session, state::AppState};

pub mod auth;
pub mod health;
pub mod pages;
pub mod proxy;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/todo_lists",
            get(proxy::list_todo_lists).post(proxy::create_todo_list),
        )
        .route(
            "/todo_items",
            get(proxy::list_todo_items).post(proxy::create_todo_item),
        )
        .route("/hello", get(proxy::hello));

    Router::new()
        .route("/", get(pages::landing))
        .route("/login", get(pages::login))
        .route("/admin/dashboard", get(pages::admin_dashboard))
        .route("/auth/receive", get(auth::receive))
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_session,
                )),
        )
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::receive,
        health::health,
        proxy::hello,
        proxy::list_todo_lists,
        proxy::create_todo_list,
        proxy::list_todo_items,
        proxy::create_todo_item
    ),
    components(schemas(health::HealthResponse)),
    tags(
        (name = "Auth", description = "Session establishment"),
        (name = "Health", description = "Service health"),
        (name = "Hello", description = "Backend connectivity check"),
        (name = "Todo Lists", description = "Todo list proxying"),
        (name = "Todo Items", description = "Todo item proxying")
    )
)]
struct ApiDoc;
