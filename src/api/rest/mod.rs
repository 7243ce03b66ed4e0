pub mod auth;
pub mod bookings;
pub mod history;
pub mod network;
pub mod profile;
pub mod session;
pub mod user_logs;
pub mod wizard;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    router_with_static(state, "static")
}

pub fn router_with_static(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(wizard::router())
        .merge(bookings::router())
        .merge(history::router())
        .merge(network::router())
        .merge(profile::router())
        .merge(user_logs::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .fallback_service(ServeDir::new(static_dir))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    sessions: usize,
    logins_in_flight: bool,
    wizards: usize,
    bookings: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.auth.active_sessions(),
        logins_in_flight: state.auth.is_loading(),
        wizards: state.wizards.len(),
        bookings: state.bookings.len(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
