use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::i18n::{Language, Translator};
use crate::models::booking::DraftField;
use crate::settings::SettingsError;
use crate::wizard::WizardError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        missing: Vec<DraftField>,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps a wizard rejection to a response, translating the user-facing
    /// prompt into the caller's language.
    pub fn from_wizard(err: WizardError, translator: &Translator, language: Language) -> Self {
        let key = match &err {
            WizardError::Incomplete { .. } => "error.fillRequired",
            WizardError::SamePickupAndDrop => "error.samePoints",
            WizardError::InvalidContact {
                field: DraftField::ReceiverPhone,
            } => "error.invalidPhone",
            WizardError::InvalidContact { .. } => "error.invalidEmail",
            WizardError::AtFirstStep
            | WizardError::NotOnFinalStep
            | WizardError::AlreadySubmitted => return AppError::Conflict(err.to_string()),
        };

        let missing = match err {
            WizardError::Incomplete { missing, .. } => missing,
            _ => Vec::new(),
        };

        AppError::Validation {
            message: translator.t(language, key),
            missing,
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Unknown { .. } => AppError::NotFound(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation { message, missing } => {
                let body = Json(json!({
                    "error": message,
                    "missing": missing,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
