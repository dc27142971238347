//! Search hooks driven by focus changes.
//!
//! The focus stack does not run searches itself. It tells the search layer
//! when a context's in-progress search must stop and when its status
//! indicator should be redrawn.

pub trait SearchCoordinator: Send + Sync {
    /// Stop any search scoped to the context `key`.
    fn cancel_search(&self, key: &str);

    /// Redraw the search status line for a context that just took focus.
    fn render_search_status(&self, key: &str);
}

/// Default coordinator used when no search layer is attached.
#[derive(Debug, Default)]
pub struct NullSearch;

impl SearchCoordinator for NullSearch {
    fn cancel_search(&self, _key: &str) {}

    fn render_search_status(&self, _key: &str) {}
}
