pub mod booking;
pub mod history;
pub mod network;
pub mod tracking;
pub mod user;
