pub mod config;
pub mod contents;
pub mod cors;
pub mod error;
pub mod explorer;
pub mod health;
pub mod history;
pub mod uploads;
