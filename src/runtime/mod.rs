//! Runtime state shared across threads.
//!
//! `focus` holds the [`ContextStack`]; `search` is the seam through which
//! focus changes reach the search layer.

pub mod focus;
pub mod search;

pub use focus::ContextStack;
pub use search::{NullSearch, SearchCoordinator};
