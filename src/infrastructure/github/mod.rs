mod contents_client_reqwest;
pub use contents_client_reqwest::*;
