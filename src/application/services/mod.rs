pub mod codec;
pub mod explorer;
pub mod history;
