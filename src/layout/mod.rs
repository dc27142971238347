//! Layout module orchestrator.
//!
//! `core` holds the stateless box solver; `arrangement` builds the
//! application's box tree from a state snapshot and feeds it to the solver.

pub mod arrangement;
mod core;

pub use arrangement::{ArrangementArgs, FocusWindows, window_dimensions};
pub use self::core::{ChildrenFn, Direction, DirectionFn, LayoutBox, Sizing, arrange_windows};
