use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PackageCategory {
    Personal,
    Commercial,
}

impl PackageCategory {
    pub const ALL: [PackageCategory; 2] = [PackageCategory::Personal, PackageCategory::Commercial];

    pub fn label(&self) -> &'static str {
        match self {
            PackageCategory::Personal => "Personal",
            PackageCategory::Commercial => "Commercial",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PackageType {
    Electronics,
    Documents,
    Clothing,
    Books,
    Medicines,
    #[serde(rename = "Food Items")]
    FoodItems,
    #[serde(rename = "Gift Items")]
    GiftItems,
    #[serde(rename = "Household Items")]
    HouseholdItems,
    Others,
}

impl PackageType {
    pub const ALL: [PackageType; 9] = [
        PackageType::Electronics,
        PackageType::Documents,
        PackageType::Clothing,
        PackageType::Books,
        PackageType::Medicines,
        PackageType::FoodItems,
        PackageType::GiftItems,
        PackageType::HouseholdItems,
        PackageType::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PackageType::Electronics => "Electronics",
            PackageType::Documents => "Documents",
            PackageType::Clothing => "Clothing",
            PackageType::Books => "Books",
            PackageType::Medicines => "Medicines",
            PackageType::FoodItems => "Food Items",
            PackageType::GiftItems => "Gift Items",
            PackageType::HouseholdItems => "Household Items",
            PackageType::Others => "Others",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageType::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown package type: {s}"))
    }
}

/// Fields of a [`BookingDraft`], used to report what a step is missing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    PickupPoint,
    DropPoint,
    PackageCategory,
    PackageType,
    Weight,
    Volume,
    Description,
    ReceiverName,
    ReceiverPhone,
    ReceiverEmail,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::PickupPoint => "pickup_point",
            DraftField::DropPoint => "drop_point",
            DraftField::PackageCategory => "package_category",
            DraftField::PackageType => "package_type",
            DraftField::Weight => "weight",
            DraftField::Volume => "volume",
            DraftField::Description => "description",
            DraftField::ReceiverName => "receiver_name",
            DraftField::ReceiverPhone => "receiver_phone",
            DraftField::ReceiverEmail => "receiver_email",
        };
        f.write_str(name)
    }
}

/// The in-progress booking form. Text fields are kept as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub pickup_point: String,
    pub drop_point: String,
    pub package_category: Option<PackageCategory>,
    pub package_type: Option<PackageType>,
    pub weight: String,
    pub volume: String,
    pub description: String,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub receiver_email: String,
}

/// A single field edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DraftUpdate {
    PickupPoint(String),
    DropPoint(String),
    PackageCategory(PackageCategory),
    PackageType(PackageType),
    Weight(String),
    Volume(String),
    Description(String),
    ReceiverName(String),
    ReceiverPhone(String),
    ReceiverEmail(String),
}

impl DraftUpdate {
    pub fn field(&self) -> DraftField {
        match self {
            DraftUpdate::PickupPoint(_) => DraftField::PickupPoint,
            DraftUpdate::DropPoint(_) => DraftField::DropPoint,
            DraftUpdate::PackageCategory(_) => DraftField::PackageCategory,
            DraftUpdate::PackageType(_) => DraftField::PackageType,
            DraftUpdate::Weight(_) => DraftField::Weight,
            DraftUpdate::Volume(_) => DraftField::Volume,
            DraftUpdate::Description(_) => DraftField::Description,
            DraftUpdate::ReceiverName(_) => DraftField::ReceiverName,
            DraftUpdate::ReceiverPhone(_) => DraftField::ReceiverPhone,
            DraftUpdate::ReceiverEmail(_) => DraftField::ReceiverEmail,
        }
    }
}

impl BookingDraft {
    pub fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::PickupPoint(value) => self.pickup_point = value,
            DraftUpdate::DropPoint(value) => self.drop_point = value,
            DraftUpdate::PackageCategory(value) => self.package_category = Some(value),
            DraftUpdate::PackageType(value) => self.package_type = Some(value),
            DraftUpdate::Weight(value) => self.weight = value,
            DraftUpdate::Volume(value) => self.volume = value,
            DraftUpdate::Description(value) => self.description = value,
            DraftUpdate::ReceiverName(value) => self.receiver_name = value,
            DraftUpdate::ReceiverPhone(value) => self.receiver_phone = value,
            DraftUpdate::ReceiverEmail(value) => self.receiver_email = value,
        }
    }

    pub fn route(&self) -> String {
        format!("{} → {}", self.pickup_point.trim(), self.drop_point.trim())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Booked,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Delivery Pending")]
    DeliveryPending,
    Delivered,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "Booked",
            BookingStatus::InTransit => "In Transit",
            BookingStatus::DeliveryPending => "Delivery Pending",
            BookingStatus::Delivered => "Delivered",
        }
    }
}

/// A submitted booking as listed on the bookings screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub rwb: String,
    pub customer_id: String,
    pub customer: String,
    pub route: String,
    pub status: BookingStatus,
    pub date: NaiveDate,
    pub bus: Option<String>,
    pub package_type: PackageType,
    pub weight: String,
    pub created_at: DateTime<Utc>,
}
