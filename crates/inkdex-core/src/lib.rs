//! Inkdex Core - Record types and reference data for the tattoo artist directory
//!
//! This crate defines the fundamental data structures used throughout Inkdex:
//! - `Artist`, `Studio`, `Style`: the searchable records
//! - `SearchRecord`: the tagged union the search pipeline works over
//! - `StyleIndex`: static style metadata with alias lookup
//! - `Catalog`: the record arrays a search runs against

pub mod catalog;
pub mod error;
pub mod fixtures;
pub mod record;
pub mod style;

pub use catalog::*;
pub use error::*;
pub use record::*;
pub use style::*;
