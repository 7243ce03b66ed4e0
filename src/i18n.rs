use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ta,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => f.write_str("en"),
            Language::Ta => f.write_str("ta"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ta" => Ok(Language::Ta),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("error.fillRequired", "Please fill in all required fields"),
    ("error.samePoints", "Pickup and drop points must be different"),
    ("error.invalidPhone", "Please enter a valid receiver phone number"),
    ("error.invalidEmail", "Please enter a valid receiver email address"),
    ("error.invalidCredentials", "Invalid email or password"),
    ("error.fillAllFields", "Please fill in all fields"),
    ("dashboard.todayBookings", "Today's Bookings"),
    ("dashboard.inTransit", "In Transit"),
    ("dashboard.delivered", "Delivered"),
    ("dashboard.pendingDelivery", "Pending Delivery"),
    ("menu.dashboard", "Dashboard"),
    ("menu.home", "Home"),
    ("menu.bookingsManagement", "Bookings Management"),
    ("menu.trackPackages", "Track Packages"),
    ("menu.trackPackage", "Track Package"),
    ("menu.pickupPoints", "Pickup Points"),
    ("menu.busAssignment", "Bus Assignment"),
    ("menu.userLogs", "User Logs"),
    ("menu.settings", "Settings"),
    ("menu.newBooking", "New Booking"),
    ("menu.myBookings", "My Bookings"),
    ("menu.incomingPackages", "Incoming Packages"),
    ("menu.history", "History"),
    ("menu.profile", "Profile"),
    ("booking.created", "Booking created successfully"),
    ("settings.updated", "Setting updated successfully"),
];

const TA: &[(&str, &str)] = &[
    ("error.fillRequired", "தயவுசெய்து தேவையான அனைத்து புலங்களையும் நிரப்பவும்"),
    ("error.samePoints", "எடுக்கும் இடமும் சேரும் இடமும் வேறுபட வேண்டும்"),
    ("error.invalidCredentials", "தவறான மின்னஞ்சல் அல்லது கடவுச்சொல்"),
    ("dashboard.todayBookings", "இன்றைய முன்பதிவுகள்"),
    ("dashboard.inTransit", "பயணத்தில்"),
    ("dashboard.delivered", "வழங்கப்பட்டது"),
    ("dashboard.pendingDelivery", "நிலுவையில் உள்ள விநியோகம்"),
    ("menu.dashboard", "முகப்பு பலகை"),
    ("menu.home", "முகப்பு"),
    ("menu.newBooking", "புதிய முன்பதிவு"),
    ("menu.myBookings", "எனது முன்பதிவுகள்"),
    ("menu.history", "வரலாறு"),
    ("menu.profile", "சுயவிவரம்"),
    ("menu.settings", "அமைப்புகள்"),
    ("booking.created", "முன்பதிவு வெற்றிகரமாக உருவாக்கப்பட்டது"),
    ("settings.updated", "அமைப்பு வெற்றிகரமாக புதுப்பிக்கப்பட்டது"),
];

/// Key-based string lookup. Missing keys fall back to English, then to the key.
#[derive(Debug, Clone)]
pub struct Translator {
    tables: HashMap<Language, HashMap<&'static str, &'static str>>,
}

impl Translator {
    pub fn new() -> Self {
        let tables = [(Language::En, EN), (Language::Ta, TA)]
            .into_iter()
            .map(|(language, entries)| (language, entries.iter().copied().collect()))
            .collect();

        Self { tables }
    }

    pub fn t(&self, language: Language, key: &str) -> String {
        self.lookup(language, key)
            .or_else(|| self.lookup(Language::En, key))
            .unwrap_or(key)
            .to_string()
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&'static str> {
        self.tables.get(&language)?.get(key).copied()
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
