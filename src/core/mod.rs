pub mod aggregator;
pub mod bank;
pub mod master;
pub mod merge;
pub mod punch;
pub mod scanner;
