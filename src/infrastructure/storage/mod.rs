mod json_config_store;
mod json_file;
mod json_history_store;

pub use json_config_store::JsonConfigStore;
pub use json_history_store::JsonHistoryStore;
