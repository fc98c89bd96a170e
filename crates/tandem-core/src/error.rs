//! Error type shared by every Tandem crate

use thiserror::Error;

/// Failures that abort a render cycle
#[derive(Debug, Error)]
pub enum TandemError {
    #[error("invalid temporal key {raw:?}: expected YYYYMMDD, YYYYMMDDHH or YYYY-MM-DD")]
    InvalidTemporalKey { raw: String },

    #[error("row {row} has no value for `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("message has no `{0}` table")]
    MissingTable(String),

    #[error("malformed host message: {0}")]
    Message(#[from] serde_json::Error),

    #[error("host rejected `{call}`: {reason}")]
    Bridge { call: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, TandemError>;
