pub mod config_store;
pub mod history_store;
pub mod repository_content;
