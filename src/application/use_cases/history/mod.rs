pub mod clear_history;
pub mod list_history;
