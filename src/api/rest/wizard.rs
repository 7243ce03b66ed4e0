use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use dashmap::mapref::one::RefMut;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::rest::session::{CurrentSession, CustomerSession};
use crate::auth::Session;
use crate::error::AppError;
use crate::models::booking::{
    Booking, BookingDraft, BookingStatus, DraftUpdate, PackageCategory, PackageType,
};
use crate::models::tracking::{PackageSummary, TimelineEvent, TrackingRecord};
use crate::state::AppState;
use crate::wizard::{BookingSummary, BookingWizard, Step, WizardError};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wizards", post(create_wizard))
        .route("/wizards/options", get(options))
        .route(
            "/wizards/:id",
            get(get_wizard).patch(update_draft).delete(discard_wizard),
        )
        .route("/wizards/:id/next", post(next_step))
        .route("/wizards/:id/back", post(previous_step))
        .route("/wizards/:id/submit", post(submit))
}

#[derive(Serialize)]
pub struct WizardView {
    pub id: Uuid,
    pub step: Step,
    pub step_index: u8,
    pub can_go_back: bool,
    pub draft: BookingDraft,
    pub summary: BookingSummary,
    pub rwb: Option<String>,
}

impl From<&BookingWizard> for WizardView {
    fn from(wizard: &BookingWizard) -> Self {
        Self {
            id: wizard.id(),
            step: wizard.step(),
            step_index: wizard.step().index(),
            can_go_back: wizard.can_go_back(),
            draft: wizard.draft().clone(),
            summary: wizard.summary(),
            rwb: wizard.rwb().map(str::to_string),
        }
    }
}

#[derive(Serialize)]
pub struct WizardOptions {
    pub points: Vec<String>,
    pub package_categories: Vec<&'static str>,
    pub package_types: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub wizard: WizardView,
    pub booking: Booking,
    pub message: String,
}

async fn options(
    State(state): State<Arc<AppState>>,
    CurrentSession(_session): CurrentSession,
) -> Json<WizardOptions> {
    let mut active: Vec<(u32, String)> = state
        .pickup_points
        .iter()
        .filter(|entry| entry.active)
        .map(|entry| (entry.id, entry.name.clone()))
        .collect();
    active.sort_by_key(|(id, _)| *id);

    Json(WizardOptions {
        points: active.into_iter().map(|(_, name)| name).collect(),
        package_categories: PackageCategory::ALL.iter().map(|c| c.label()).collect(),
        package_types: PackageType::ALL.iter().map(|t| t.label()).collect(),
    })
}

async fn create_wizard(
    State(state): State<Arc<AppState>>,
    CustomerSession(session): CustomerSession,
) -> Json<WizardView> {
    let wizard = BookingWizard::new(
        session.user.id.clone(),
        state.contact_rules,
        state.clock.clone(),
    );
    let view = WizardView::from(&wizard);

    info!(wizard_id = %wizard.id(), user_id = %session.user.id, "booking wizard opened");
    state.wizards.insert(wizard.id(), wizard);
    state.metrics.active_wizards.inc();

    Json(view)
}

async fn get_wizard(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let wizard = owned_wizard(&state, &session, id)?;
    Ok(Json(WizardView::from(&*wizard)))
}

async fn update_draft(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(update): Json<DraftUpdate>,
) -> Result<Json<WizardView>, AppError> {
    let mut wizard = owned_wizard(&state, &session, id)?;
    let field = update.field();

    wizard
        .apply(update)
        .map_err(|err| AppError::from_wizard(err, &state.translator, session.language))?;

    debug!(wizard_id = %id, field = %field, "draft updated");
    Ok(Json(WizardView::from(&*wizard)))
}

async fn next_step(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    transition(&state, &session, id, "next", BookingWizard::next)
}

async fn previous_step(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    transition(&state, &session, id, "back", BookingWizard::back)
}

async fn submit(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let (view, booking, record) = {
        let mut wizard = owned_wizard(&state, &session, id)?;
        let result = wizard.submit().map(str::to_string);
        state.metrics.record_transition("submit", result.is_ok());

        let rwb = result
            .map_err(|err| AppError::from_wizard(err, &state.translator, session.language))?;
        let (booking, record) = booking_from_draft(&rwb, wizard.draft(), &session);
        (WizardView::from(&*wizard), booking, record)
    };

    state.bookings.insert(booking.rwb.clone(), booking.clone());
    state.tracking.insert(record.rwb.clone(), record);
    state.metrics.bookings_submitted_total.inc();
    let _ = state.booking_events_tx.send(booking.clone());

    info!(
        wizard_id = %id,
        rwb = %booking.rwb,
        route = %booking.route,
        "booking submitted"
    );

    Ok(Json(SubmitResponse {
        wizard: view,
        booking,
        message: state.translator.t(session.language, "booking.created"),
    }))
}

async fn discard_wizard(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    drop(owned_wizard(&state, &session, id)?);

    if state.wizards.remove(&id).is_some() {
        state.metrics.active_wizards.dec();
        debug!(wizard_id = %id, "booking wizard discarded");
    }

    Ok(StatusCode::NO_CONTENT)
}

fn transition(
    state: &AppState,
    session: &Session,
    id: Uuid,
    action: &'static str,
    step: impl FnOnce(&mut BookingWizard) -> Result<Step, WizardError>,
) -> Result<Json<WizardView>, AppError> {
    let mut wizard = owned_wizard(state, session, id)?;
    let result = step(&mut *wizard);
    state.metrics.record_transition(action, result.is_ok());

    match result {
        Ok(step) => {
            debug!(wizard_id = %id, action, step = step.index(), "wizard moved");
            Ok(Json(WizardView::from(&*wizard)))
        }
        Err(err) => Err(AppError::from_wizard(err, &state.translator, session.language)),
    }
}

/// Wizards are only visible to the user who opened them.
fn owned_wizard<'a>(
    state: &'a AppState,
    session: &Session,
    id: Uuid,
) -> Result<RefMut<'a, Uuid, BookingWizard>, AppError> {
    state
        .wizards
        .get_mut(&id)
        .filter(|wizard| wizard.owner_id() == session.user.id)
        .ok_or_else(|| AppError::NotFound(format!("wizard {id} not found")))
}

fn booking_from_draft(rwb: &str, draft: &BookingDraft, session: &Session) -> (Booking, TrackingRecord) {
    let now = Utc::now();
    let package_type = draft.package_type.unwrap_or(PackageType::Others);
    let weight = format!("{} kg", draft.weight.trim());
    let pickup = draft.pickup_point.trim().to_string();

    let booking = Booking {
        rwb: rwb.to_string(),
        customer_id: session.user.id.clone(),
        customer: session.user.name.clone(),
        route: draft.route(),
        status: BookingStatus::Booked,
        date: now.date_naive(),
        bus: None,
        package_type,
        weight: weight.clone(),
        created_at: now,
    };

    let record = TrackingRecord {
        rwb: rwb.to_string(),
        status: BookingStatus::Booked,
        current_location: pickup.clone(),
        route: booking.route.clone(),
        bus: None,
        estimated_delivery: None,
        delivered_at: None,
        package: PackageSummary {
            package_type: package_type.label().to_string(),
            weight,
            sender: session.user.name.clone(),
            receiver: draft.receiver_name.trim().to_string(),
        },
        timeline: vec![TimelineEvent {
            location: pickup,
            time: now.format("%Y-%m-%d %I:%M %p").to_string(),
            status: "Package Booked".to_string(),
            completed: true,
            current: true,
        }],
    };

    (booking, record)
}
