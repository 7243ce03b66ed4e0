pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod observability;
pub mod search;
pub mod seed;
pub mod settings;
pub mod state;
pub mod wizard;
