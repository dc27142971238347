//! Which view each window currently shows.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use crate::context::Context;

/// A window that was rebound away from a view it no longer owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reclaimed {
    pub window: String,
    pub from_view: String,
    pub to_view: String,
}

#[derive(Debug, Clone)]
struct Borrow {
    view: String,
    previous: String,
}

#[derive(Debug, Default)]
struct Bindings {
    views: HashMap<String, String>,
    borrowed: HashMap<String, Borrow>,
}

/// Maps each window (a semantic screen slot) to the view shown in it.
///
/// An unmapped window shows the view of the same name.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    inner: RwLock<Bindings>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_for_window(&self, window: &str) -> String {
        let bindings = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        bindings
            .views
            .get(window)
            .cloned()
            .unwrap_or_else(|| window.to_string())
    }

    pub fn bind(&self, window: impl Into<String>, view: impl Into<String>) {
        self.write().views.insert(window.into(), view.into());
    }

    /// Windows currently showing `view`.
    pub fn windows_showing(&self, view: &str) -> Vec<String> {
        let bindings = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut windows: Vec<_> = bindings
            .views
            .iter()
            .filter(|(_, bound)| bound.as_str() == view)
            .map(|(window, _)| window.clone())
            .collect();
        windows.sort();
        windows
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .views
            .clone()
    }

    /// Record that `context`'s window now shows its view.
    ///
    /// A transient context first hands back every other window still bound
    /// to its view, so no two windows claim the same view.
    pub fn set_window_context(&self, context: &Context) -> Vec<Reclaimed> {
        let view = context.view_name();
        let window = context.window_name();
        let mut bindings = self.write();

        let mut reclaimed = Vec::new();
        if context.is_transient() {
            let stale: Vec<String> = bindings
                .views
                .iter()
                .filter(|(bound_window, bound_view)| {
                    bound_view.as_str() == view && bound_window.as_str() != window
                })
                .map(|(bound_window, _)| bound_window.clone())
                .collect();

            for stale_window in stale {
                bindings.borrowed.remove(&stale_window);
                bindings
                    .views
                    .insert(stale_window.clone(), stale_window.clone());
                reclaimed.push(Reclaimed {
                    to_view: stale_window.clone(),
                    window: stale_window,
                    from_view: view.to_string(),
                });
            }
            reclaimed.sort_by(|a, b| a.window.cmp(&b.window));

            let previous = bindings
                .views
                .get(window)
                .cloned()
                .unwrap_or_else(|| window.to_string());
            if previous != view {
                bindings.borrowed.insert(
                    window.to_string(),
                    Borrow {
                        view: view.to_string(),
                        previous,
                    },
                );
            }
        } else {
            bindings.borrowed.remove(window);
        }

        bindings.views.insert(window.to_string(), view.to_string());
        reclaimed
    }

    /// Give a borrowed window back once its transient context loses focus.
    ///
    /// The window returns to whatever it showed before the borrow, or to its
    /// own default. Windows rebound by someone else in the meantime are left
    /// alone.
    pub fn release_window_context(&self, context: &Context) -> Option<Reclaimed> {
        if !context.is_transient() {
            return None;
        }

        let view = context.view_name();
        let window = context.window_name();
        let mut bindings = self.write();

        let owns_borrow = bindings
            .borrowed
            .get(window)
            .is_some_and(|borrow| borrow.view == view);
        let borrow = if owns_borrow {
            bindings.borrowed.remove(window)
        } else {
            None
        };

        let bound = bindings.views.get(window)?;
        if bound != view {
            return None;
        }

        let to_view = borrow
            .map(|borrow| borrow.previous)
            .unwrap_or_else(|| window.to_string());
        if to_view == view {
            return None;
        }
        bindings.views.insert(window.to_string(), to_view.clone());
        Some(Reclaimed {
            window: window.to_string(),
            from_view: view.to_string(),
            to_view,
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Bindings> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
