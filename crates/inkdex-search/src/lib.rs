//! Inkdex Search - In-memory filtering, scoring and ordering of directory records
//!
//! This crate provides:
//! - Query and filter types (`SearchQuery`, `SearchFilters`, `SortBy`)
//! - Per-facet filter predicates
//! - Relevance scoring and sort strategies
//! - The composed search pipeline
//! - Suggestions and result export

pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod query;
pub mod scoring;
pub mod sort;
pub mod suggest;

pub use engine::*;
pub use error::*;
pub use export::*;
pub use filter::*;
pub use query::*;
pub use scoring::*;
pub use sort::*;
pub use suggest::*;
