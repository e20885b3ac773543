pub mod date;
pub mod formatting;
pub mod table;
pub mod time;
pub mod validate;

pub use formatting::mins2readable;
