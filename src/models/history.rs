use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Delivered,
    Cancelled,
    Returned,
}

impl HistoryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HistoryStatus::Delivered => "Delivered",
            HistoryStatus::Cancelled => "Cancelled",
            HistoryStatus::Returned => "Returned",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: u32,
    pub rwb: String,
    pub direction: Direction,
    /// Destination for sent parcels, source for received ones.
    pub place: String,
    pub status: HistoryStatus,
    pub date: String,
    pub package_type: String,
    pub weight: String,
    pub receiver: Option<String>,
    pub sender: Option<String>,
    pub delivered_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncomingStage {
    AwaitingConfirmation,
    DeliveryPending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Depot {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
}

/// A parcel addressed to the current customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingPackage {
    pub id: u32,
    pub rwb: String,
    pub sender: String,
    pub sender_phone: String,
    pub from: String,
    pub package_type: String,
    pub weight: String,
    pub description: String,
    pub bus: Option<String>,
    pub estimated_arrival: Option<String>,
    pub arrived_at: Option<String>,
    pub depot: Option<Depot>,
    pub stage: IncomingStage,
    pub decision: Option<Decision>,
}
