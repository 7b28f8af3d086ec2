pub mod repository;
pub mod uploads;
