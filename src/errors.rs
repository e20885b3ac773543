//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent across commands.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid date range: end {1} is before start {0}")]
    InvalidRange(String, String),

    #[error("Invalid PIN '{0}': must be exactly 4 digits")]
    InvalidPin(String),

    #[error("Invalid CPF: {0}")]
    InvalidCpf(String),

    #[error("Invalid e-mail address: {0}")]
    InvalidEmail(String),

    #[error("Invalid punch kind: {0}")]
    InvalidKind(String),

    // ---------------------------
    // Business rules
    // ---------------------------
    #[error("No user found for e-mail {0}")]
    UserNotFound(String),

    #[error("A user already exists with e-mail {0}")]
    DuplicateEmail(String),

    #[error("Range not found: {0}")]
    RangeNotFound(String),

    #[error("The master admin cannot be demoted or deleted")]
    MasterProtected,

    #[error("Justification pending for {0}: run `rponto justify` before punching again")]
    PendingJustification(String),

    #[error("A justified interval must end after it starts")]
    EmptyJustifiedInterval,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Sync / export
    // ---------------------------
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
