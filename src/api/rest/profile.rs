use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::api::rest::session::CustomerSession;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::history::{Direction, HistoryItem, HistoryStatus, IncomingPackage, IncomingStage};
use crate::models::user::User;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(profile))
}

const RECENT_LIMIT: usize = 3;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProfileStats {
    pub total_sent: usize,
    pub total_received: usize,
    pub pending_deliveries: usize,
    pub completed_deliveries: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProfileActivity {
    pub direction: Direction,
    pub rwb: String,
    /// Destination for sent parcels, source for received ones.
    pub place: String,
    pub date: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct Profile {
    pub user: User,
    pub stats: ProfileStats,
    pub recent_activity: Vec<ProfileActivity>,
}

/// Bookings the customer made in this process count as sent parcels even
/// before they show up in history.
pub fn profile_stats(
    own: &[Booking],
    history: &[HistoryItem],
    incoming: &[IncomingPackage],
) -> ProfileStats {
    let archived: HashSet<&str> = history.iter().map(|item| item.rwb.as_str()).collect();
    let in_history = &archived;
    let fresh = move || {
        own.iter()
            .filter(move |booking| !in_history.contains(booking.rwb.as_str()))
    };

    let sent_in_history = history
        .iter()
        .filter(|item| item.direction == Direction::Sent)
        .count();
    let delivered_in_history = history
        .iter()
        .filter(|item| item.status == HistoryStatus::Delivered)
        .count();

    ProfileStats {
        total_sent: sent_in_history + fresh().count(),
        total_received: history
            .iter()
            .filter(|item| item.direction == Direction::Received)
            .count(),
        pending_deliveries: own
            .iter()
            .filter(|booking| booking.status != BookingStatus::Delivered)
            .count()
            + incoming
                .iter()
                .filter(|package| package.stage == IncomingStage::DeliveryPending)
                .count(),
        completed_deliveries: delivered_in_history
            + fresh()
                .filter(|booking| booking.status == BookingStatus::Delivered)
                .count(),
    }
}

/// Newest first. A parcel that is still moving reports its live booking
/// status instead of the archived one.
pub fn recent_activity(own: &[Booking], history: &[HistoryItem], limit: usize) -> Vec<ProfileActivity> {
    let live_status = |rwb: &str| {
        own.iter()
            .find(|booking| booking.rwb == rwb)
            .map(|booking| booking.status.label())
    };
    let in_history: HashSet<&str> = history.iter().map(|item| item.rwb.as_str()).collect();

    let mut entries: Vec<ProfileActivity> = history
        .iter()
        .map(|item| ProfileActivity {
            direction: item.direction,
            rwb: item.rwb.clone(),
            place: item.place.clone(),
            date: item.date.clone(),
            status: live_status(item.rwb.as_str())
                .unwrap_or_else(|| item.status.label())
                .to_string(),
        })
        .chain(
            own.iter()
                .filter(|booking| !in_history.contains(booking.rwb.as_str()))
                .map(|booking| ProfileActivity {
                    direction: Direction::Sent,
                    rwb: booking.rwb.clone(),
                    place: destination(&booking.route).to_string(),
                    date: booking.date.to_string(),
                    status: booking.status.label().to_string(),
                }),
        )
        .collect();

    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.rwb.cmp(&b.rwb)));
    entries.truncate(limit);
    entries
}

fn destination(route: &str) -> &str {
    route.rsplit('→').next().unwrap_or(route).trim()
}

async fn profile(
    State(state): State<Arc<AppState>>,
    CustomerSession(session): CustomerSession,
) -> Json<Profile> {
    let own: Vec<Booking> = state
        .bookings
        .iter()
        .filter(|entry| entry.customer_id == session.user.id)
        .map(|entry| entry.value().clone())
        .collect();
    let incoming: Vec<IncomingPackage> = state
        .incoming
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    Json(Profile {
        stats: profile_stats(&own, &state.history, &incoming),
        recent_activity: recent_activity(&own, &state.history, RECENT_LIMIT),
        user: session.user,
    })
}
