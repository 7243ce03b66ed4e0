use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::api::rest::session::AdminSession;
use crate::error::AppError;
use crate::models::user::{RecentActivity, UserLog};
use crate::search::{filter_user_logs, UserLogFilter};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user-logs", get(list_user_logs))
        .route("/user-logs/:id", get(get_user_log))
}

#[derive(Deserialize, Default)]
pub struct UserLogQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub filter: UserLogFilter,
}

#[derive(Serialize)]
pub struct UserLogPage {
    pub users: Vec<UserLog>,
    pub recent_activities: Vec<RecentActivity>,
}

async fn list_user_logs(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    Query(query): Query<UserLogQuery>,
) -> Json<UserLogPage> {
    Json(UserLogPage {
        users: filter_user_logs(&state.user_logs, &query.q, query.filter),
        recent_activities: state.recent_activities.clone(),
    })
}

async fn get_user_log(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    Path(id): Path<u32>,
) -> Result<Json<UserLog>, AppError> {
    state
        .user_logs
        .iter()
        .find(|log| log.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))
}
