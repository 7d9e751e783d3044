//! Inkdex Session - The search controller behind the directory UI
//!
//! A `SearchSession` owns one user's search state. It debounces input,
//! runs the search pipeline against a `RecordSource`, keeps the last good
//! results visible on failure, and remembers recent and saved searches.
//! Sessions are independent values; nothing is shared between them.

pub mod config;
pub mod error;
pub mod map;
pub mod session;
pub mod source;
pub mod state;

pub use config::*;
pub use error::*;
pub use map::*;
pub use session::*;
pub use source::*;
pub use state::*;
