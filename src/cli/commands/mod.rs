pub mod audit;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod punch;
pub mod ranges;
pub mod summary;
pub mod sync;
pub mod user;
