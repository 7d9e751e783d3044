//! Error types for inkdex-search

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unknown sort mode: {0}")]
    InvalidSort(String),

    #[error("Invalid {facet} filter value: {value}")]
    InvalidFilter { facet: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] inkdex_core::CoreError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
