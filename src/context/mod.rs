//! Context model: what a focusable panel carries and how contexts stack.
//!
//! `core` defines the context record and its hooks, `tree` indexes every
//! context known at startup, and `rules` holds the stacking policy as pure
//! functions.

mod core;
pub mod rules;
mod tree;

pub use self::core::{
    Context, ContextBuilder, ContextHooks, ContextKey, ContextKind, FocusHook, FocusLostHook,
    HookResult, OnFocusLostOpts, OnFocusOpts, RenderHook, RenderToMainHook, RenderToMainOpts,
    SEARCH_CONTEXT_KEY,
};
pub use rules::Transition;
pub use tree::ContextTree;
