pub mod config;
pub mod contents;
pub mod explorer;
pub mod history;
