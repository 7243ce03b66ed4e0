use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRole {
    Customer,
    Receiver,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Active,
    Inactive,
}

/// Per-user activity summary shown on the admin user logs screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLog {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: LogRole,
    pub total_packages_sent: u32,
    pub total_packages_received: u32,
    pub last_activity: String,
    pub join_date: String,
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivity {
    pub user: String,
    pub action: String,
    pub time: String,
}
