pub mod config;
pub mod uploads;
