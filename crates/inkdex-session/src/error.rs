//! Error types for inkdex-session

use inkdex_core::RecordId;
use thiserror::Error;

use crate::ProblemDetails;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Upstream error: {0}")]
    Upstream(ProblemDetails),

    #[error("Search failed: {0}")]
    Pipeline(String),

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Session closed")]
    Closed,

    #[error("Search error: {0}")]
    Search(#[from] inkdex_search::SearchError),

    #[error("Store error: {0}")]
    Store(#[from] inkdex_store::StoreError),
}

impl From<ProblemDetails> for SessionError {
    fn from(problem: ProblemDetails) -> Self {
        SessionError::Upstream(problem)
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
