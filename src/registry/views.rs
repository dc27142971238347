//! Boundary to the renderer's named views, plus an in-memory table.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Boundary to the renderer's named views.
///
/// Views are long-lived: contexts hide and show them instead of recreating
/// them, which keeps scroll offsets and avoids flicker. Every method takes
/// `&self` so the focus stack can drive it from any thread.
pub trait ViewRegistry: Send + Sync {
    fn contains(&self, view: &str) -> bool;
    fn set_visible(&self, view: &str, visible: bool);
    fn raise_to_top(&self, view: &str);
    fn set_title(&self, view: &str, title: &str);
    fn is_editable(&self, view: &str) -> bool;
    /// Keep the selection highlighted on a view that no longer has input.
    fn set_highlight_inactive(&self, view: &str, inactive: bool);
    /// View currently receiving terminal input.
    fn current_view(&self) -> Option<String>;
    fn set_current_view(&self, view: &str);
    fn set_cursor_visible(&self, visible: bool);
}

/// Last known state of a view in a [`ViewTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub visible: bool,
    pub title: String,
    pub editable: bool,
    pub highlight_inactive: bool,
}

#[derive(Debug, Default)]
struct Views {
    entries: HashMap<String, ViewState>,
    z_order: Vec<String>,
    current: Option<String>,
    cursor_visible: bool,
}

/// Headless [`ViewRegistry`] keeping view state in memory.
///
/// Useful on its own for tests and scripted runs, and as the bookkeeping
/// half of a real terminal backend.
#[derive(Debug, Default)]
pub struct ViewTable {
    inner: RwLock<Views>,
}

impl ViewTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_views<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let table = Self::new();
        for name in names {
            table.register(name);
        }
        table
    }

    pub fn register(&self, name: impl Into<String>) {
        self.insert(name.into(), false);
    }

    /// Register a view that accepts typed input, e.g. a prompt.
    pub fn register_editable(&self, name: impl Into<String>) {
        self.insert(name.into(), true);
    }

    fn insert(&self, name: String, editable: bool) {
        let mut views = self.write();
        if !views.z_order.contains(&name) {
            views.z_order.push(name.clone());
        }
        views.entries.insert(
            name,
            ViewState {
                editable,
                ..ViewState::default()
            },
        );
    }

    pub fn state(&self, view: &str) -> Option<ViewState> {
        self.read().entries.get(view).cloned()
    }

    pub fn is_visible(&self, view: &str) -> bool {
        self.state(view).is_some_and(|state| state.visible)
    }

    /// Views ordered bottom to top.
    pub fn z_order(&self) -> Vec<String> {
        self.read().z_order.clone()
    }

    pub fn top_view(&self) -> Option<String> {
        self.read().z_order.last().cloned()
    }

    pub fn cursor_visible(&self) -> bool {
        self.read().cursor_visible
    }

    fn read(&self) -> RwLockReadGuard<'_, Views> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Views> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, view: &str, apply: impl FnOnce(&mut ViewState)) {
        if let Some(state) = self.write().entries.get_mut(view) {
            apply(state);
        }
    }
}

impl ViewRegistry for ViewTable {
    fn contains(&self, view: &str) -> bool {
        self.read().entries.contains_key(view)
    }

    fn set_visible(&self, view: &str, visible: bool) {
        self.update(view, |state| state.visible = visible);
    }

    fn raise_to_top(&self, view: &str) {
        let mut views = self.write();
        if let Some(idx) = views.z_order.iter().position(|name| name == view) {
            let name = views.z_order.remove(idx);
            views.z_order.push(name);
        }
    }

    fn set_title(&self, view: &str, title: &str) {
        self.update(view, |state| state.title = title.to_string());
    }

    fn is_editable(&self, view: &str) -> bool {
        self.state(view).is_some_and(|state| state.editable)
    }

    fn set_highlight_inactive(&self, view: &str, inactive: bool) {
        self.update(view, |state| state.highlight_inactive = inactive);
    }

    fn current_view(&self) -> Option<String> {
        self.read().current.clone()
    }

    fn set_current_view(&self, view: &str) {
        let mut views = self.write();
        if let Some(state) = views.entries.get_mut(view) {
            state.highlight_inactive = false;
            views.current = Some(view.to_string());
        }
    }

    fn set_cursor_visible(&self, visible: bool) {
        self.write().cursor_visible = visible;
    }
}
