//! Per-session preferences behind the settings screen: notification switches,
//! system parameters and security parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SettingsSection {
    Notifications,
    System,
    Security,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown setting {section:?}.{setting}")]
    Unknown {
        section: SettingsSection,
        setting: String,
    },

    #[error("{setting} is a value, not a switch")]
    NotASwitch { setting: String },

    #[error("{setting} is a switch, not a value")]
    NotAValue { setting: String },

    #[error("{setting} expects a whole number, got {value:?}")]
    NotANumber { setting: String, value: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub push_notifications: bool,
    pub delivery_alerts: bool,
    pub booking_confirmations: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            push_notifications: true,
            delivery_alerts: true,
            booking_confirmations: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemSettings {
    pub auto_status_update: bool,
    pub package_retention_days: u32,
    /// Kilograms.
    pub max_package_weight: u32,
    pub require_receiver_confirmation: bool,
    pub allow_cancellation: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            auto_status_update: true,
            package_retention_days: 7,
            max_package_weight: 25,
            require_receiver_confirmation: true,
            allow_cancellation: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecuritySettings {
    pub two_factor_auth: bool,
    /// Minutes.
    pub session_timeout: u32,
    /// Days.
    pub password_expiry: u32,
    pub login_attempts: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_auth: false,
            session_timeout: 30,
            password_expiry: 90,
            login_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub notifications: NotificationSettings,
    pub system: SystemSettings,
    pub security: SecuritySettings,
}

enum Slot<'a> {
    Switch(&'a mut bool),
    Value(&'a mut u32),
}

impl Preferences {
    /// Flips a switch and returns its new state.
    pub fn toggle(&mut self, section: SettingsSection, setting: &str) -> Result<bool, SettingsError> {
        match self.slot(section, setting)? {
            Slot::Switch(flag) => {
                *flag = !*flag;
                Ok(*flag)
            }
            Slot::Value(_) => Err(SettingsError::NotASwitch {
                setting: setting.to_string(),
            }),
        }
    }

    /// Stores a numeric value typed by the user.
    pub fn update(
        &mut self,
        section: SettingsSection,
        setting: &str,
        raw: &str,
    ) -> Result<u32, SettingsError> {
        match self.slot(section, setting)? {
            Slot::Value(slot) => {
                let value = raw.trim().parse::<u32>().map_err(|_| SettingsError::NotANumber {
                    setting: setting.to_string(),
                    value: raw.to_string(),
                })?;
                *slot = value;
                Ok(value)
            }
            Slot::Switch(_) => Err(SettingsError::NotAValue {
                setting: setting.to_string(),
            }),
        }
    }

    fn slot(&mut self, section: SettingsSection, setting: &str) -> Result<Slot<'_>, SettingsError> {
        let slot = match (section, setting) {
            (SettingsSection::Notifications, "email_notifications") => {
                Slot::Switch(&mut self.notifications.email_notifications)
            }
            (SettingsSection::Notifications, "sms_notifications") => {
                Slot::Switch(&mut self.notifications.sms_notifications)
            }
            (SettingsSection::Notifications, "push_notifications") => {
                Slot::Switch(&mut self.notifications.push_notifications)
            }
            (SettingsSection::Notifications, "delivery_alerts") => {
                Slot::Switch(&mut self.notifications.delivery_alerts)
            }
            (SettingsSection::Notifications, "booking_confirmations") => {
                Slot::Switch(&mut self.notifications.booking_confirmations)
            }
            (SettingsSection::System, "auto_status_update") => {
                Slot::Switch(&mut self.system.auto_status_update)
            }
            (SettingsSection::System, "package_retention_days") => {
                Slot::Value(&mut self.system.package_retention_days)
            }
            (SettingsSection::System, "max_package_weight") => {
                Slot::Value(&mut self.system.max_package_weight)
            }
            (SettingsSection::System, "require_receiver_confirmation") => {
                Slot::Switch(&mut self.system.require_receiver_confirmation)
            }
            (SettingsSection::System, "allow_cancellation") => {
                Slot::Switch(&mut self.system.allow_cancellation)
            }
            (SettingsSection::Security, "two_factor_auth") => {
                Slot::Switch(&mut self.security.two_factor_auth)
            }
            (SettingsSection::Security, "session_timeout") => {
                Slot::Value(&mut self.security.session_timeout)
            }
            (SettingsSection::Security, "password_expiry") => {
                Slot::Value(&mut self.security.password_expiry)
            }
            (SettingsSection::Security, "login_attempts") => {
                Slot::Value(&mut self.security.login_attempts)
            }
            _ => {
                return Err(SettingsError::Unknown {
                    section,
                    setting: setting.to_string(),
                })
            }
        };
        Ok(slot)
    }
}
