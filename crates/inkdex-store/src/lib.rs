//! Inkdex Store - Durable client-side state
//!
//! This crate provides:
//! - A key/value storage abstraction with file-backed and in-memory backends
//! - Recent search history (`tattoo_recent_searches`)
//! - User-named saved searches (`tattoo_saved_searches`)
//!
//! Stored blobs are unversioned JSON. Anything missing or unreadable loads
//! as an empty list.

pub mod error;
pub mod history;
pub mod local;
pub mod saved;
pub mod storage;

pub use error::*;
pub use history::*;
pub use local::*;
pub use saved::*;
pub use storage::*;
