use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, put};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::rest::session::AdminSession;
use crate::error::AppError;
use crate::models::network::{BusAssignment, BusStatus, PickupPoint};
use crate::seed::{AVAILABLE_BUSES, AVAILABLE_ROUTES};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pickup-points", get(list_points).post(create_point))
        .route("/pickup-points/:id", put(update_point).delete(delete_point))
        .route("/pickup-points/:id/toggle", patch(toggle_point))
        .route("/bus-assignments", get(list_assignments))
        .route("/bus-assignments/:id/status", patch(update_assignment_status))
}

#[derive(Deserialize)]
pub struct PointRequest {
    pub name: String,
    pub code: String,
    pub address: String,
    pub phone: String,
}

#[derive(Deserialize)]
pub struct UpdatePointRequest {
    pub name: String,
    pub code: String,
    pub address: String,
    pub phone: String,
    pub active: bool,
    pub routes: u32,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BusStatus,
}

#[derive(Serialize)]
pub struct BusBoard {
    pub assignments: Vec<BusAssignment>,
    pub available_buses: Vec<&'static str>,
    pub available_routes: Vec<&'static str>,
}

fn require_filled(fields: [&str; 4]) -> Result<(), AppError> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::BadRequest("all fields are required".to_string()));
    }
    Ok(())
}

async fn list_points(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
) -> Json<Vec<PickupPoint>> {
    let mut points: Vec<PickupPoint> = state
        .pickup_points
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    points.sort_by_key(|point| point.id);
    Json(points)
}

async fn create_point(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    Json(payload): Json<PointRequest>,
) -> Result<Json<PickupPoint>, AppError> {
    require_filled([&payload.name, &payload.code, &payload.address, &payload.phone])?;

    let point = PickupPoint {
        id: state.allocate_point_id(),
        name: payload.name,
        code: payload.code,
        address: payload.address,
        phone: payload.phone,
        active: true,
        routes: 0,
    };

    state.pickup_points.insert(point.id, point.clone());
    info!(point_id = point.id, code = %point.code, "pickup point added");
    Ok(Json(point))
}

async fn update_point(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    Path(id): Path<u32>,
    Json(payload): Json<UpdatePointRequest>,
) -> Result<Json<PickupPoint>, AppError> {
    require_filled([&payload.name, &payload.code, &payload.address, &payload.phone])?;

    let mut point = state
        .pickup_points
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("pickup point {id} not found")))?;

    point.name = payload.name;
    point.code = payload.code;
    point.address = payload.address;
    point.phone = payload.phone;
    point.active = payload.active;
    point.routes = payload.routes;

    Ok(Json(point.clone()))
}

async fn delete_point(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppError> {
    state
        .pickup_points
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("pickup point {id} not found")))?;

    info!(point_id = id, "pickup point deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_point(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    Path(id): Path<u32>,
) -> Result<Json<PickupPoint>, AppError> {
    let mut point = state
        .pickup_points
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("pickup point {id} not found")))?;

    point.active = !point.active;
    Ok(Json(point.clone()))
}

async fn list_assignments(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
) -> Json<BusBoard> {
    let mut assignments: Vec<BusAssignment> = state
        .bus_assignments
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    assignments.sort_by_key(|assignment| assignment.id);

    Json(BusBoard {
        assignments,
        available_buses: AVAILABLE_BUSES.to_vec(),
        available_routes: AVAILABLE_ROUTES.to_vec(),
    })
}

async fn update_assignment_status(
    State(state): State<Arc<AppState>>,
    AdminSession(_session): AdminSession,
    Path(id): Path<u32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<BusAssignment>, AppError> {
    let mut assignment = state
        .bus_assignments
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("bus assignment {id} not found")))?;

    assignment.status = payload.status;
    info!(bus = %assignment.bus_number, status = ?payload.status, "bus assignment updated");

    Ok(Json(assignment.clone()))
}
