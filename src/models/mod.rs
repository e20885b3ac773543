pub mod date_range;
pub mod day_summary;
pub mod log_type;
pub mod punch_log;
pub mod snapshot;
pub mod user;
