//! Focus stack and window layout core for a multi-panel terminal UI.
//!
//! Contexts (focusable panels) are stacked by [`ContextStack`] according to
//! their [`ContextKind`]; each activation binds a window to a view through
//! the [`WindowRegistry`]. Every layout pass builds a [`LayoutBox`] tree and
//! resolves it into per-window [`Dimensions`].

pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod registry;
pub mod runtime;
pub mod width;

pub use config::{GuiConfig, MainPanelSplitMode, PortraitMode, ScreenMode, SideViewLocation};
pub use context::{
    Context, ContextBuilder, ContextHooks, ContextKey, ContextKind, ContextTree, OnFocusLostOpts,
    OnFocusOpts, RenderToMainOpts, SEARCH_CONTEXT_KEY,
};
pub use error::{HookError, PaneError, Result};
pub use geometry::{Dimensions, Size};
pub use layout::{
    ArrangementArgs, Direction, FocusWindows, LayoutBox, Sizing, arrange_windows,
    window_dimensions,
};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use registry::{LayoutRegistry, Reclaimed, ViewRegistry, ViewState, ViewTable, WindowRegistry};
pub use runtime::{ContextStack, NullSearch, SearchCoordinator};
pub use width::display_width;
