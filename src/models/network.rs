use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickupPoint {
    pub id: u32,
    pub name: String,
    pub code: String,
    pub address: String,
    pub phone: String,
    pub active: bool,
    pub routes: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BusStatus {
    Scheduled,
    InTransit,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusAssignment {
    pub id: u32,
    pub bus_number: String,
    pub route: String,
    pub departure: String,
    pub arrival: String,
    pub packages: u32,
    pub capacity: u32,
    pub driver: String,
    pub status: BusStatus,
}
