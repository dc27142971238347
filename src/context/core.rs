use std::fmt;
use std::sync::Arc;

use crate::error::{HookError, PaneError, Result};

/// Stable identifier of a context.
pub type ContextKey = String;

/// Key of the dedicated search prompt popup.
pub const SEARCH_CONTEXT_KEY: &str = "search";

/// Stacking category of a context. Decides eviction, not rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Top-level panel of the side section; mutually exclusive like tabs.
    Side,
    /// Content of the main section; at most one on the stack.
    Main,
    /// Popup that closes as soon as anything else is pushed over it.
    TemporaryPopup,
    /// Popup that stays underneath whatever is pushed over it.
    PersistentPopup,
    /// Auxiliary panel such as the command log.
    Extras,
}

impl ContextKind {
    pub fn is_popup(self) -> bool {
        matches!(self, ContextKind::TemporaryPopup | ContextKind::PersistentPopup)
    }

    pub fn label(self) -> &'static str {
        match self {
            ContextKind::Side => "side",
            ContextKind::Main => "main",
            ContextKind::TemporaryPopup => "temporary_popup",
            ContextKind::PersistentPopup => "persistent_popup",
            ContextKind::Extras => "extras",
        }
    }
}

/// Passed through from input dispatch to `on_focus`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnFocusOpts {
    pub clicked_window_name: Option<String>,
    pub clicked_view_line_idx: Option<usize>,
}

/// Tells a context which context is taking focus from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnFocusLostOpts {
    pub new_context_key: ContextKey,
}

impl OnFocusLostOpts {
    pub fn new(new_context_key: impl Into<ContextKey>) -> Self {
        Self {
            new_context_key: new_context_key.into(),
        }
    }

    pub fn to_search(&self) -> bool {
        self.new_context_key == SEARCH_CONTEXT_KEY
    }
}

/// Options for rendering a context's content into the main section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderToMainOpts {
    pub clicked_view_line_idx: Option<usize>,
}

impl From<&OnFocusOpts> for RenderToMainOpts {
    fn from(opts: &OnFocusOpts) -> Self {
        Self {
            clicked_view_line_idx: opts.clicked_view_line_idx,
        }
    }
}

pub type HookResult = std::result::Result<(), HookError>;
pub type FocusHook = Arc<dyn Fn(&OnFocusOpts) -> HookResult + Send + Sync>;
pub type FocusLostHook = Arc<dyn Fn(&OnFocusLostOpts) -> HookResult + Send + Sync>;
pub type RenderHook = Arc<dyn Fn() -> HookResult + Send + Sync>;
pub type RenderToMainHook = Arc<dyn Fn(&RenderToMainOpts) -> HookResult + Send + Sync>;

/// Callbacks supplied by the code that owns a panel. Empty slots are no-ops.
#[derive(Clone, Default)]
pub struct ContextHooks {
    pub on_focus: Option<FocusHook>,
    pub on_focus_lost: Option<FocusLostHook>,
    pub on_render: Option<RenderHook>,
    pub on_render_to_main: Option<RenderToMainHook>,
}

impl fmt::Debug for ContextHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHooks")
            .field("on_focus", &self.on_focus.is_some())
            .field("on_focus_lost", &self.on_focus_lost.is_some())
            .field("on_render", &self.on_render.is_some())
            .field("on_render_to_main", &self.on_render_to_main.is_some())
            .finish()
    }
}

/// A focusable logical panel bound to a view.
///
/// Contexts are built once at startup and shared as `Arc<Context>`; only
/// their position on the stack changes afterwards.
#[derive(Debug, Clone)]
pub struct Context {
    key: ContextKey,
    kind: ContextKind,
    view_name: String,
    window_name: String,
    parent: Option<ContextKey>,
    focusable: bool,
    transient: bool,
    title: Option<String>,
    hooks: ContextHooks,
}

impl Context {
    pub fn builder(
        key: impl Into<ContextKey>,
        kind: ContextKind,
        view_name: impl Into<String>,
    ) -> ContextBuilder {
        ContextBuilder::new(key, kind, view_name)
    }

    pub fn key(&self) -> &ContextKey {
        &self.key
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn window_name(&self) -> &str {
        &self.window_name
    }

    pub fn parent(&self) -> Option<&ContextKey> {
        self.parent.as_ref()
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Whether the context borrows its window from someone else.
    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn hooks(&self) -> &ContextHooks {
        &self.hooks
    }

    pub fn handle_focus(&self, opts: &OnFocusOpts) -> Result<()> {
        match &self.hooks.on_focus {
            Some(hook) => hook(opts).map_err(|source| self.hook_error(source)),
            None => Ok(()),
        }
    }

    pub fn handle_focus_lost(&self, opts: &OnFocusLostOpts) -> Result<()> {
        match &self.hooks.on_focus_lost {
            Some(hook) => hook(opts).map_err(|source| self.hook_error(source)),
            None => Ok(()),
        }
    }

    pub fn handle_render(&self) -> Result<()> {
        match &self.hooks.on_render {
            Some(hook) => hook().map_err(|source| self.hook_error(source)),
            None => Ok(()),
        }
    }

    pub fn handle_render_to_main(&self, opts: &RenderToMainOpts) -> Result<()> {
        match &self.hooks.on_render_to_main {
            Some(hook) => hook(opts).map_err(|source| self.hook_error(source)),
            None => Ok(()),
        }
    }

    fn hook_error(&self, source: HookError) -> PaneError {
        PaneError::Hook {
            context: self.key.clone(),
            source,
        }
    }
}

pub struct ContextBuilder {
    context: Context,
    transient: Option<bool>,
}

impl ContextBuilder {
    pub fn new(key: impl Into<ContextKey>, kind: ContextKind, view_name: impl Into<String>) -> Self {
        let view_name = view_name.into();
        Self {
            context: Context {
                key: key.into(),
                kind,
                window_name: view_name.clone(),
                view_name,
                parent: None,
                focusable: true,
                transient: false,
                title: None,
                hooks: ContextHooks::default(),
            },
            transient: None,
        }
    }

    pub fn window(mut self, window_name: impl Into<String>) -> Self {
        self.context.window_name = window_name.into();
        self
    }

    pub fn parent(mut self, parent: impl Into<ContextKey>) -> Self {
        self.context.parent = Some(parent.into());
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.context.focusable = focusable;
        self
    }

    /// Override the popup-derived default.
    pub fn transient(mut self, transient: bool) -> Self {
        self.transient = Some(transient);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.context.title = Some(title.into());
        self
    }

    pub fn on_focus<F>(mut self, hook: F) -> Self
    where
        F: Fn(&OnFocusOpts) -> HookResult + Send + Sync + 'static,
    {
        self.context.hooks.on_focus = Some(Arc::new(hook));
        self
    }

    pub fn on_focus_lost<F>(mut self, hook: F) -> Self
    where
        F: Fn(&OnFocusLostOpts) -> HookResult + Send + Sync + 'static,
    {
        self.context.hooks.on_focus_lost = Some(Arc::new(hook));
        self
    }

    pub fn on_render<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> HookResult + Send + Sync + 'static,
    {
        self.context.hooks.on_render = Some(Arc::new(hook));
        self
    }

    pub fn on_render_to_main<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RenderToMainOpts) -> HookResult + Send + Sync + 'static,
    {
        self.context.hooks.on_render_to_main = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Arc<Context> {
        let mut context = self.context;
        context.transient = self.transient.unwrap_or(context.kind.is_popup());
        Arc::new(context)
    }
}
