use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::auth::MockAuthProvider;
use crate::config::Config;
use crate::i18n::Translator;
use crate::models::booking::Booking;
use crate::models::history::{HistoryItem, IncomingPackage};
use crate::models::network::{BusAssignment, PickupPoint};
use crate::models::tracking::TrackingRecord;
use crate::models::user::{RecentActivity, UserLog};
use crate::observability::metrics::Metrics;
use crate::seed;
use crate::wizard::rwb::{Clock, SystemClock};
use crate::wizard::validate::ContactRules;
use crate::wizard::BookingWizard;

pub struct AppState {
    pub auth: MockAuthProvider,
    pub translator: Translator,
    pub clock: Arc<dyn Clock>,
    pub contact_rules: ContactRules,
    pub wizards: DashMap<Uuid, BookingWizard>,
    pub bookings: DashMap<String, Booking>,
    pub tracking: DashMap<String, TrackingRecord>,
    pub pickup_points: DashMap<u32, PickupPoint>,
    pub bus_assignments: DashMap<u32, BusAssignment>,
    pub incoming: DashMap<u32, IncomingPackage>,
    pub history: Vec<HistoryItem>,
    pub user_logs: Vec<UserLog>,
    pub recent_activities: Vec<RecentActivity>,
    pub booking_events_tx: broadcast::Sender<Booking>,
    pub metrics: Metrics,
    pub idle_timeout: TimeDelta,
    next_point_id: AtomicU32,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let (booking_events_tx, _unused_rx) = broadcast::channel(config.event_buffer_size);
        let pickup_points = seed::pickup_points();
        let next_point_id = pickup_points.iter().map(|point| point.id).max().unwrap_or(0) + 1;

        Self {
            auth: MockAuthProvider::new(config.login_delay(), config.default_language),
            translator: Translator::new(),
            clock,
            contact_rules: config.contact_rules(),
            wizards: DashMap::new(),
            bookings: keyed(seed::bookings(), |booking| booking.rwb.clone()),
            tracking: keyed(seed::tracking_records(), |record| record.rwb.clone()),
            pickup_points: keyed(pickup_points, |point| point.id),
            bus_assignments: keyed(seed::bus_assignments(), |assignment| assignment.id),
            incoming: keyed(seed::incoming_packages(), |package| package.id),
            history: seed::history(),
            user_logs: seed::user_logs(),
            recent_activities: seed::recent_activities(),
            booking_events_tx,
            metrics: Metrics::new(),
            idle_timeout: config.idle_timeout(),
            next_point_id: AtomicU32::new(next_point_id),
        }
    }

    /// Hands out pickup point ids; never returns the same id twice.
    pub fn allocate_point_id(&self) -> u32 {
        self.next_point_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Drops wizards and sessions untouched for longer than the idle timeout.
    /// Returns `(wizards, sessions)` evicted.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> (usize, usize) {
        let mut wizards = 0;
        self.wizards.retain(|_, wizard| {
            let keep = now.signed_duration_since(wizard.last_activity()) <= self.idle_timeout;
            if !keep {
                wizards += 1;
            }
            keep
        });
        self.metrics.active_wizards.sub(wizards as i64);

        let sessions = self.auth.evict_idle(now, self.idle_timeout);
        (wizards, sessions)
    }
}

pub async fn run_idle_sweeper(state: Arc<AppState>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let (wizards, sessions) = state.evict_idle(Utc::now());
        if wizards + sessions > 0 {
            debug!(wizards, sessions, "idle sweep finished");
        }
    }
}

fn keyed<K, V>(items: Vec<V>, key: impl Fn(&V) -> K) -> DashMap<K, V>
where
    K: std::hash::Hash + Eq,
{
    items.into_iter().map(|item| (key(&item), item)).collect()
}
