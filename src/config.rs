use std::env;
use std::time::Duration;

use chrono::TimeDelta;

use crate::error::AppError;
use crate::i18n::Language;
use crate::wizard::validate::ContactRules;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub login_delay_ms: u64,
    pub strict_contact_validation: bool,
    pub default_language: Language,
    pub static_dir: String,
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            login_delay_ms: parse_or_default("LOGIN_DELAY_MS", 1000)?,
            strict_contact_validation: parse_or_default("STRICT_CONTACT_VALIDATION", false)?,
            default_language: parse_or_default("DEFAULT_LANGUAGE", Language::En)?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            idle_timeout_secs: parse_or_default("IDLE_TIMEOUT_SECS", 1800)?,
            sweep_interval_secs: parse_or_default("SWEEP_INTERVAL_SECS", 60)?,
        })
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    /// How long a session or wizard may sit untouched before it is evicted.
    pub fn idle_timeout(&self) -> TimeDelta {
        TimeDelta::from_std(Duration::from_secs(self.idle_timeout_secs)).unwrap_or(TimeDelta::MAX)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    pub fn contact_rules(&self) -> ContactRules {
        if self.strict_contact_validation {
            ContactRules::Strict
        } else {
            ContactRules::Presence
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            log_level: "info".to_string(),
            event_buffer_size: 1024,
            login_delay_ms: 1000,
            strict_contact_validation: false,
            default_language: Language::En,
            static_dir: "static".to_string(),
            idle_timeout_secs: 1800,
            sweep_interval_secs: 60,
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
