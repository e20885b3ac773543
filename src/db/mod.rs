pub mod audit;
pub mod initialize;
pub mod logs;
pub mod migrate;
pub mod pool;
pub mod ranges;
pub mod snapshot;
pub mod users;
