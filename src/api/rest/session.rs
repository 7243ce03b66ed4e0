use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::Session;
use crate::error::AppError;
use crate::state::AppState;

/// The caller's session, resolved from `Authorization: Bearer <token>`.
pub struct CurrentSession(pub Session);

/// A session whose user has the admin role.
pub struct AdminSession(pub Session);

/// A session whose user is a customer.
pub struct CustomerSession(pub Session);

pub fn bearer_token(parts: &Parts) -> Result<Uuid, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .and_then(|token| token.trim().parse::<Uuid>().ok())
        .ok_or_else(|| AppError::Unauthorized("malformed bearer token".to_string()))
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        state
            .auth
            .session(&token)
            .map(CurrentSession)
            .ok_or_else(|| AppError::Unauthorized("unknown or expired session".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        if !session.user.is_admin() {
            return Err(AppError::Forbidden("admin role required".to_string()));
        }
        Ok(AdminSession(session))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CustomerSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        if session.user.is_admin() {
            return Err(AppError::Forbidden("customer account required".to_string()));
        }
        Ok(CustomerSession(session))
    }
}
