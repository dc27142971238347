//! Error module orchestrator.
//!
//! Every fallible operation in the crate reports through [`PaneError`].

mod types;

pub use types::{HookError, PaneError, Result};
