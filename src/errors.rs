//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so error reporting
//! stays in one place: `main` prints it and exits with status 1.

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
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid aircraft registration: {0}")]
    InvalidRegistration(String),

    #[error("Invalid CNPJ/CPF: {0}")]
    InvalidCnpj(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid birth date: {0}")]
    InvalidBirthDate(String),

    #[error("Invalid value: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("Logbook month {0} is closed")]
    MonthClosed(String),

    #[error("Logbook month {0} is already closed")]
    MonthAlreadyClosed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("CNPJ or registration incorrect")]
    PortalLoginFailed,

    #[error("Portal session invalid or expired")]
    PortalSessionInvalid,

    #[error("Receipt numbering error: {0}")]
    ReceiptNumbering(String),

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
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
