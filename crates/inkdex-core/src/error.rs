//! Error types for inkdex-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
