//! The focus stack.
//!
//! [`ContextStack`] owns the ordered stack of focused contexts and applies
//! the stacking rules from [`crate::context::rules`]. Stack shape changes
//! happen under a write lock that is released before any view or hook side
//! effect runs, so hooks may query the stack freely.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::search::{NullSearch, SearchCoordinator};
use crate::context::rules::{self, Transition};
use crate::context::{
    Context, ContextKey, ContextKind, ContextTree, OnFocusLostOpts, OnFocusOpts,
    RenderToMainOpts,
};
use crate::error::{PaneError, Result};
use crate::layout::FocusWindows;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::registry::{Reclaimed, ViewRegistry, WindowRegistry};

const LOG_TARGET: &str = "pane_stack::focus";

pub struct ContextStack {
    contexts: ContextTree,
    stack: RwLock<Vec<Arc<Context>>>,
    windows: WindowRegistry,
    views: Arc<dyn ViewRegistry>,
    search: Arc<dyn SearchCoordinator>,
    logger: Option<Logger>,
}

impl ContextStack {
    /// Create an empty stack. Push the default context to initialise it.
    pub fn new(contexts: ContextTree, views: Arc<dyn ViewRegistry>) -> Self {
        Self {
            contexts,
            stack: RwLock::new(Vec::new()),
            windows: WindowRegistry::new(),
            views,
            search: Arc::new(NullSearch),
            logger: None,
        }
    }

    pub fn with_search(mut self, search: Arc<dyn SearchCoordinator>) -> Self {
        self.search = search;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn contexts(&self) -> &ContextTree {
        &self.contexts
    }

    pub fn windows(&self) -> &WindowRegistry {
        &self.windows
    }

    /// Focus `context`, evicting whatever the stacking rules say it closes.
    ///
    /// Pushing a non-focusable context or the current top does nothing.
    pub fn push(&self, context: &Arc<Context>, opts: OnFocusOpts) -> Result<()> {
        if !context.is_focusable() {
            return Ok(());
        }

        let transition = {
            let mut stack = self.write();
            if stack.last().is_some_and(|top| top.key() == context.key()) {
                return Ok(());
            }
            let transition = rules::plan_push(&stack, context);
            *stack = transition.stack.clone();
            transition
        };

        self.trace(
            "context_pushed",
            [
                json_str("key", context.key().as_str()),
                json_str("kind", context.kind().label()),
                json_kv("evicted", transition.evicted_keys()),
            ],
        );

        let lost = OnFocusLostOpts::new(context.key().as_str());
        self.deactivate_all(&transition, &lost)?;
        self.activate(context, &opts)
    }

    /// Push the context registered under `key`.
    pub fn push_key(&self, key: &str, opts: OnFocusOpts) -> Result<()> {
        let context = self
            .contexts
            .get(key)
            .cloned()
            .ok_or_else(|| PaneError::UnknownContext(key.to_string()))?;
        self.push(&context, opts)
    }

    /// Return focus to the previous context. The floor is never popped.
    pub fn pop(&self) -> Result<()> {
        let transition = {
            let mut stack = self.write();
            let Some(transition) = rules::plan_pop(&stack) else {
                return Ok(());
            };
            *stack = transition.stack.clone();
            transition
        };

        let Some(new_top) = transition.stack.last().cloned() else {
            return Ok(());
        };
        self.trace(
            "context_popped",
            [
                json_kv("popped", transition.evicted_keys()),
                json_str("current", new_top.key().as_str()),
            ],
        );

        let lost = OnFocusLostOpts::new(new_top.key().as_str());
        self.deactivate_all(&transition, &lost)?;
        self.activate(&new_top, &OnFocusOpts::default())
    }

    /// Overwrite the top of the stack with `context` and activate it.
    ///
    /// The replaced context is not deactivated.
    pub fn replace(&self, context: &Arc<Context>) -> Result<()> {
        let replaced = {
            let mut stack = self.write();
            let replaced = stack.pop();
            stack.push(context.clone());
            replaced
        };

        self.trace(
            "context_replaced",
            [
                json_str("key", context.key().as_str()),
                json_kv(
                    "replaced",
                    replaced
                        .as_ref()
                        .map(|previous| Value::from(previous.key().as_str()))
                        .unwrap_or(Value::Null),
                ),
            ],
        );

        self.activate(context, &OnFocusOpts::default())
    }

    /// Drop every listed context from the stack and refocus the new top.
    ///
    /// The floor entry stays put even when listed.
    pub fn remove_contexts(&self, keys: &[&str]) -> Result<()> {
        let transition = {
            let mut stack = self.write();
            let Some(transition) = rules::plan_remove(&stack, keys) else {
                return Ok(());
            };
            *stack = transition.stack.clone();
            transition
        };

        let Some(new_top) = transition.stack.last().cloned() else {
            return Ok(());
        };
        self.trace(
            "contexts_removed",
            [
                json_kv("removed", transition.evicted_keys()),
                json_str("current", new_top.key().as_str()),
            ],
        );

        let lost = OnFocusLostOpts::new(new_top.key().as_str());
        self.deactivate_all(&transition, &lost)?;
        self.activate(&new_top, &OnFocusOpts::default())
    }

    /// Bring `context`'s view forward and hand it terminal input.
    ///
    /// Does not touch the stack, so it also serves to re-focus the current
    /// context after its view was disturbed.
    ///
    /// # Panics
    ///
    /// Panics when the context's view was never registered. View bindings
    /// are wired at startup, so this is a programming error.
    pub fn activate(&self, context: &Context, opts: &OnFocusOpts) -> Result<()> {
        let view = self.require_view(context);

        for reclaimed in self.windows.set_window_context(context) {
            self.trace_reclaimed(&reclaimed);
        }
        self.views.raise_to_top(view);

        if let Some(previous) = self.views.current_view() {
            if previous != view {
                self.views.set_highlight_inactive(&previous, true);
            }
        }
        self.views.set_current_view(view);

        self.search.render_search_status(context.key());

        if let Some(title) = context.title().filter(|title| !title.is_empty()) {
            self.views.set_title(view, title);
        }
        self.views.set_visible(view, true);
        self.views.set_cursor_visible(self.views.is_editable(view));

        context.handle_focus(opts)
    }

    fn deactivate(&self, context: &Context, opts: &OnFocusLostOpts) -> Result<()> {
        let view = context.view_name();
        let kind = context.kind();

        if !opts.to_search() && (kind == ContextKind::Main || kind.is_popup()) {
            self.search.cancel_search(context.key());
        }
        if kind.is_popup() && self.views.contains(view) {
            self.views.set_visible(view, false);
        }
        if let Some(reclaimed) = self.windows.release_window_context(context) {
            self.trace_reclaimed(&reclaimed);
        }

        context.handle_focus_lost(opts)
    }

    fn deactivate_all(&self, transition: &Transition, opts: &OnFocusLostOpts) -> Result<()> {
        for evicted in &transition.evicted {
            self.deactivate(evicted, opts)?;
        }
        Ok(())
    }

    /// Redraw the real panel under any popups, e.g. after a resize.
    pub fn rerender_static(&self) -> Result<()> {
        let context = self.current_static();
        context.handle_render()?;
        context.handle_render_to_main(&RenderToMainOpts::default())
    }

    /// Focused context, or the default side context on an empty stack.
    pub fn current(&self) -> Arc<Context> {
        self.read()
            .last()
            .cloned()
            .unwrap_or_else(|| self.contexts.default_context().clone())
    }

    pub fn current_side(&self) -> Arc<Context> {
        self.find_from_top(|context| context.kind() == ContextKind::Side)
    }

    /// Topmost context that is not a popup.
    pub fn current_static(&self) -> Arc<Context> {
        self.find_from_top(|context| !context.kind().is_popup())
    }

    pub fn is_current(&self, context: &Context) -> bool {
        self.current().key() == context.key()
    }

    /// Whether `context` is focused or is an ancestor of the focused context.
    pub fn is_current_or_parent(&self, context: &Context) -> bool {
        let mut cursor = Some(self.current());
        // a parent cycle cannot be longer than the tree
        for _ in 0..=self.contexts.len() {
            let Some(candidate) = cursor else {
                return false;
            };
            if candidate.key() == context.key() {
                return true;
            }
            cursor = candidate
                .parent()
                .and_then(|parent| self.contexts.get(parent))
                .cloned();
        }
        false
    }

    /// Visit stacked contexts bottom to top under the read lock.
    ///
    /// `visit` must not mutate the stack.
    pub fn for_each(&self, mut visit: impl FnMut(&Arc<Context>)) {
        for context in self.read().iter() {
            visit(context);
        }
    }

    /// Look up any known context, stacked or not.
    pub fn context_for_key(&self, key: &str) -> Option<Arc<Context>> {
        self.contexts.get(key).cloned()
    }

    pub fn current_popups(&self) -> Vec<Arc<Context>> {
        self.read()
            .iter()
            .filter(|context| context.kind().is_popup())
            .cloned()
            .collect()
    }

    pub fn stack_keys(&self) -> Vec<ContextKey> {
        self.read()
            .iter()
            .map(|context| context.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Window names the layout pass needs from the stack.
    pub fn focus_windows(&self) -> FocusWindows {
        FocusWindows {
            current: self.current().window_name().to_string(),
            current_static: self.current_static().window_name().to_string(),
            current_side: self.current_side().window_name().to_string(),
        }
    }

    fn find_from_top(&self, matches: impl Fn(&Context) -> bool) -> Arc<Context> {
        self.read()
            .iter()
            .rev()
            .find(|context| matches(context))
            .cloned()
            .unwrap_or_else(|| self.contexts.default_context().clone())
    }

    fn require_view<'a>(&self, context: &'a Context) -> &'a str {
        let view = context.view_name();
        if !self.views.contains(view) {
            panic!(
                "context `{}` is bound to unregistered view `{}`",
                context.key(),
                view
            );
        }
        view
    }

    fn trace_reclaimed(&self, reclaimed: &Reclaimed) {
        self.trace(
            "window_reclaimed",
            [
                json_str("window", reclaimed.window.as_str()),
                json_str("from_view", reclaimed.from_view.as_str()),
                json_str("view", reclaimed.to_view.as_str()),
            ],
        );
    }

    fn trace(&self, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        let Some(logger) = &self.logger else {
            return;
        };
        if !logger.enabled(LogLevel::Debug) {
            return;
        }
        let _ = logger.log_event(event_with_fields(
            LogLevel::Debug,
            LOG_TARGET,
            message,
            fields,
        ));
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Context>>> {
        self.stack.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Context>>> {
        self.stack.write().unwrap_or_else(PoisonError::into_inner)
    }
}
