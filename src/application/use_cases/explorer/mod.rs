pub mod browse_path;
pub mod helpers;
pub mod open_entry;
pub mod retry_browse;
