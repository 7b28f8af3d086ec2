pub mod github;
pub mod storage;
