//! Unified application error type.
//! The helper, the procedure store and the CLI all return AppError so that
//! callers see one error surface.

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

    #[error("The connection to the {0} database could not be opened")]
    NotConnected(String),

    #[error("The connection handle has already been released")]
    Released,

    // ---------------------------
    // Invocation errors
    // ---------------------------
    #[error("Could not find stored procedure '{0}'")]
    UnknownProcedure(String),

    #[error("Procedure '{procedure}' has no parameter named '{parameter}'")]
    UnknownParameter {
        procedure: String,
        parameter: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid procedure definition: {0}")]
    InvalidProcedure(String),

    #[error("Row has {found} value(s) but the table has {expected} column(s)")]
    RowWidth { expected: usize, found: usize },

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

impl AppError {
    /// True for failures raised while building a stored-procedure invocation.
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            AppError::UnknownProcedure(_) | AppError::UnknownParameter { .. }
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
