use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::session::{AdminSession, CurrentSession};
use crate::auth::Session;
use crate::error::AppError;
use crate::i18n::Language;
use crate::models::user::User;
use crate::settings::{
    NotificationSettings, Preferences, SecuritySettings, SettingsError, SettingsSection,
    SystemSettings,
};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/me", get(me))
        .route("/settings", get(get_settings).patch(update_language))
        .route("/settings/:section/:setting", put(update_setting))
        .route("/settings/:section/:setting/toggle", post(toggle_setting))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub user: User,
}

#[derive(Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Deserialize)]
pub struct SettingValueRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct SettingsView {
    pub language: Language,
    pub notifications: NotificationSettings,
    pub system: SystemSettings,
    pub security: SecuritySettings,
}

impl From<&Session> for SettingsView {
    fn from(session: &Session) -> Self {
        let Preferences {
            notifications,
            system,
            security,
        } = session.preferences;

        Self {
            language: session.language,
            notifications,
            system,
            security,
        }
    }
}

#[derive(Serialize)]
pub struct SettingChanged {
    pub settings: SettingsView,
    pub message: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        let message = state
            .translator
            .t(Language::default(), "error.fillAllFields");
        return Err(AppError::BadRequest(message));
    }

    match state.auth.login(&payload.email, &payload.password).await {
        Some(Session { token, user, .. }) => {
            state
                .metrics
                .login_attempts_total
                .with_label_values(&["success"])
                .inc();
            Ok(Json(LoginResponse { token, user }))
        }
        None => {
            state
                .metrics
                .login_attempts_total
                .with_label_values(&["failure"])
                .inc();
            let message = state
                .translator
                .t(Language::default(), "error.invalidCredentials");
            Err(AppError::Unauthorized(message))
        }
    }
}

async fn logout(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> StatusCode {
    state.auth.logout(&session.token);
    StatusCode::NO_CONTENT
}

async fn me(CurrentSession(session): CurrentSession) -> Json<Session> {
    Json(session)
}

async fn get_settings(CurrentSession(session): CurrentSession) -> Json<SettingsView> {
    Json(SettingsView::from(&session))
}

async fn update_language(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<LanguageRequest>,
) -> Result<Json<SettingsView>, AppError> {
    let updated = state
        .auth
        .set_language(&session.token, payload.language)
        .ok_or_else(expired)?;

    Ok(Json(SettingsView::from(&updated)))
}

async fn toggle_setting(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Path((section, setting)): Path<(SettingsSection, String)>,
) -> Result<Json<SettingChanged>, AppError> {
    change_setting(&state, &session, |prefs| {
        let enabled = prefs.toggle(section, &setting)?;
        info!(section = ?section, setting = %setting, enabled, "setting toggled");
        Ok(())
    })
}

async fn update_setting(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Path((section, setting)): Path<(SettingsSection, String)>,
    Json(payload): Json<SettingValueRequest>,
) -> Result<Json<SettingChanged>, AppError> {
    change_setting(&state, &session, |prefs| {
        let value = prefs.update(section, &setting, &payload.value)?;
        info!(section = ?section, setting = %setting, value, "setting updated");
        Ok(())
    })
}

fn change_setting(
    state: &AppState,
    session: &Session,
    change: impl FnOnce(&mut Preferences) -> Result<(), SettingsError>,
) -> Result<Json<SettingChanged>, AppError> {
    let (outcome, updated) = state
        .auth
        .update_session(&session.token, |stored| change(&mut stored.preferences))
        .ok_or_else(expired)?;
    outcome?;

    Ok(Json(SettingChanged {
        settings: SettingsView::from(&updated),
        message: state.translator.t(updated.language, "settings.updated"),
    }))
}

fn expired() -> AppError {
    AppError::Unauthorized("unknown or expired session".to_string())
}
