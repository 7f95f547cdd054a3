//! Router wiring: pages, the JSON sub-API and middleware.

pub mod api;
pub mod health;
pub mod pages;

use crate::state::AppState;
use axum::Router;
use axum::http::{HeaderName, Request};
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let request_id = request
            .headers()
            .get(&REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        tracing::info_span!(
            "http.request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .route("/", get(pages::home))
        .route("/teams", get(pages::teams))
        .route("/teams/{team_id}", get(pages::team))
        .route("/scores", get(pages::scores))
        .route("/statistics", get(pages::statistics))
        .route("/game/{game_id}", get(pages::game))
        .route("/api/teams", get(api::teams))
        .route("/api/teams/{team_id}/roster", get(api::roster))
        .route("/api/prediction", get(api::prediction))
        .route("/api/nba-news", get(api::news))
        .route("/health", get(health::health))
        .fallback(pages::not_found)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID))
        .layer(trace_layer)
        .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
        .with_state(state)
}
