use serde::{Deserialize, Serialize};

use crate::models::booking::BookingStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub location: String,
    pub time: String,
    pub status: String,
    pub completed: bool,
    #[serde(default)]
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSummary {
    pub package_type: String,
    pub weight: String,
    pub sender: String,
    pub receiver: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub rwb: String,
    pub status: BookingStatus,
    pub current_location: String,
    pub route: String,
    pub bus: Option<String>,
    pub estimated_delivery: Option<String>,
    pub delivered_at: Option<String>,
    pub package: PackageSummary,
    pub timeline: Vec<TimelineEvent>,
}
