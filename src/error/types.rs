use thiserror::Error;

/// Unified result type for the pane stack crate.
pub type Result<T> = std::result::Result<T, PaneError>;

/// Error type returned by panel hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the focus stack, layout and configuration layers.
#[derive(Debug, Error)]
pub enum PaneError {
    #[error("context `{0}` registered twice")]
    DuplicateContext(String),
    #[error("context `{0}` not found")]
    UnknownContext(String),
    #[error("default context `{0}` must be a registered side context")]
    InvalidDefaultContext(String),
    #[error("hook failed for context `{context}`: {source}")]
    Hook {
        context: String,
        #[source]
        source: HookError,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
