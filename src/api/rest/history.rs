use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::rest::session::{CurrentSession, CustomerSession};
use crate::error::AppError;
use crate::models::history::{Decision, HistoryItem, IncomingPackage, IncomingStage};
use crate::search::{filter_history, HistoryFilter};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/history", get(list_history))
        .route("/confirmations", get(list_confirmations))
        .route("/confirmations/:id/accept", post(accept))
        .route("/confirmations/:id/reject", post(reject))
}

#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub filter: HistoryFilter,
}

#[derive(Serialize)]
pub struct Confirmations {
    pub pending: Vec<IncomingPackage>,
    pub delivery_pending: Vec<IncomingPackage>,
}

async fn list_history(
    State(state): State<Arc<AppState>>,
    CurrentSession(_session): CurrentSession,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<HistoryItem>> {
    Json(filter_history(&state.history, &query.q, query.filter))
}

async fn list_confirmations(
    State(state): State<Arc<AppState>>,
    CurrentSession(_session): CurrentSession,
) -> Json<Confirmations> {
    let mut packages: Vec<IncomingPackage> = state
        .incoming
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    packages.sort_by_key(|package| package.id);

    let (pending, delivery_pending): (Vec<_>, Vec<_>) = packages
        .into_iter()
        .partition(|package| package.stage == IncomingStage::AwaitingConfirmation);

    Json(Confirmations {
        pending,
        delivery_pending,
    })
}

async fn accept(
    State(state): State<Arc<AppState>>,
    CustomerSession(session): CustomerSession,
    Path(id): Path<u32>,
) -> Result<Json<IncomingPackage>, AppError> {
    decide(&state, id, Decision::Accepted, &session.user.id)
}

async fn reject(
    State(state): State<Arc<AppState>>,
    CustomerSession(session): CustomerSession,
    Path(id): Path<u32>,
) -> Result<Json<IncomingPackage>, AppError> {
    decide(&state, id, Decision::Rejected, &session.user.id)
}

fn decide(
    state: &AppState,
    id: u32,
    decision: Decision,
    user_id: &str,
) -> Result<Json<IncomingPackage>, AppError> {
    let mut package = state
        .incoming
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("incoming package {id} not found")))?;

    if package.stage != IncomingStage::AwaitingConfirmation {
        return Err(AppError::Conflict(format!(
            "package {} is not awaiting confirmation",
            package.rwb
        )));
    }
    if let Some(previous) = package.decision {
        return Err(AppError::Conflict(format!(
            "package {} was already {previous:?}",
            package.rwb
        )));
    }

    package.decision = Some(decision);
    info!(rwb = %package.rwb, user_id = %user_id, decision = ?decision, "incoming package decided");

    Ok(Json(package.clone()))
}
