use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::rest::session::CurrentSession;
use crate::auth::Session;
use crate::error::AppError;
use crate::i18n::Translator;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::tracking::TrackingRecord;
use crate::models::user::Role;
use crate::search::filter_bookings;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/:rwb", get(get_booking))
        .route("/tracking/:query", get(track))
        .route("/dashboard", get(dashboard))
        .route("/menu", get(menu))
}

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: usize,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct MenuItem {
    pub label: String,
    pub route: &'static str,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dashboard {
    Admin {
        stats: Vec<StatCard>,
        recent_bookings: Vec<Booking>,
    },
    Customer {
        user: String,
        quick_actions: Vec<MenuItem>,
        recent_shipments: Vec<Booking>,
    },
}

const RECENT_LIMIT: usize = 3;

const ADMIN_MENU: [(&str, &str); 7] = [
    ("menu.dashboard", "/dashboard"),
    ("menu.bookingsManagement", "/bookings"),
    ("menu.trackPackages", "/tracking"),
    ("menu.pickupPoints", "/pickup-points"),
    ("menu.busAssignment", "/bus-assignment"),
    ("menu.userLogs", "/user-logs"),
    ("menu.settings", "/settings"),
];

const CUSTOMER_MENU: [(&str, &str); 7] = [
    ("menu.home", "/dashboard"),
    ("menu.newBooking", "/new-booking"),
    ("menu.myBookings", "/bookings"),
    ("menu.trackPackage", "/tracking"),
    ("menu.incomingPackages", "/confirmations"),
    ("menu.history", "/history"),
    ("menu.profile", "/profile"),
];

pub fn menu_for(session: &Session, translator: &Translator) -> Vec<MenuItem> {
    let entries: &[(&str, &'static str)] = match session.user.role {
        Role::Admin => &ADMIN_MENU,
        Role::Customer => &CUSTOMER_MENU,
    };

    entries
        .iter()
        .map(|&(key, route)| MenuItem {
            label: translator.t(session.language, key),
            route,
        })
        .collect()
}

/// Bookings the caller may see: everything for admins, their own otherwise.
fn visible_bookings(state: &AppState, session: &Session) -> Vec<Booking> {
    state
        .bookings
        .iter()
        .filter(|entry| session.user.is_admin() || entry.customer_id == session.user.id)
        .map(|entry| entry.value().clone())
        .collect()
}

async fn list_bookings(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Booking>> {
    let visible = visible_bookings(&state, &session);
    Json(filter_bookings(&visible, &query.q))
}

async fn get_booking(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(rwb): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let rwb = rwb.trim().to_uppercase();
    state
        .bookings
        .get(&rwb)
        .filter(|booking| session.user.is_admin() || booking.customer_id == session.user.id)
        .map(|booking| Json(booking.value().clone()))
        .ok_or_else(|| AppError::NotFound(format!("booking {rwb} not found")))
}

/// Finds the record whose id appears in the query. When several ids match,
/// the longest one wins.
pub fn find_tracking<'a>(
    records: impl IntoIterator<Item = &'a TrackingRecord>,
    query: &str,
) -> Option<&'a TrackingRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    records
        .into_iter()
        .filter(|record| needle.contains(&record.rwb.to_lowercase()))
        .max_by_key(|record| record.rwb.len())
}

async fn track(
    State(state): State<Arc<AppState>>,
    CurrentSession(_session): CurrentSession,
    Path(query): Path<String>,
) -> Result<Json<TrackingRecord>, AppError> {
    let records: Vec<TrackingRecord> = state
        .tracking
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    find_tracking(&records, &query)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no shipment matches {query}")))
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Json<Dashboard> {
    let recent = filter_bookings(&visible_bookings(&state, &session), "");
    let t = |key: &str| state.translator.t(session.language, key);

    let view = match session.user.role {
        Role::Admin => {
            let today = Utc::now().date_naive();

            Dashboard::Admin {
                stats: vec![
                    StatCard {
                        title: t("dashboard.todayBookings"),
                        value: count_where(&recent, |b| b.date == today),
                    },
                    StatCard {
                        title: t("dashboard.inTransit"),
                        value: count_where(&recent, |b| b.status == BookingStatus::InTransit),
                    },
                    StatCard {
                        title: t("dashboard.delivered"),
                        value: count_where(&recent, |b| b.status == BookingStatus::Delivered),
                    },
                    StatCard {
                        title: t("dashboard.pendingDelivery"),
                        value: count_where(&recent, |b| b.status == BookingStatus::DeliveryPending),
                    },
                ],
                recent_bookings: recent.into_iter().take(RECENT_LIMIT).collect(),
            }
        }
        Role::Customer => Dashboard::Customer {
            user: session.user.name.clone(),
            quick_actions: menu_for(&session, &state.translator)
                .into_iter()
                .filter(|item| matches!(item.route, "/new-booking" | "/tracking"))
                .collect(),
            recent_shipments: recent.into_iter().take(RECENT_LIMIT).collect(),
        },
    };

    Json(view)
}

fn count_where(bookings: &[Booking], pred: impl Fn(&Booking) -> bool) -> usize {
    bookings.iter().filter(|&booking| pred(booking)).count()
}

async fn menu(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Json<Vec<MenuItem>> {
    Json(menu_for(&session, &state.translator))
}
