//! Registries shared by the focus stack and the layout pass.
//!
//! `views` is the boundary to the renderer's views, `windows` tracks which
//! view each window shows, and `layout` remembers the last resolved
//! rectangles.

mod layout;
mod views;
mod windows;

pub use layout::LayoutRegistry;
pub use views::{ViewRegistry, ViewState, ViewTable};
pub use windows::{Reclaimed, WindowRegistry};
