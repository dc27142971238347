//! Focus changes feeding the layout pass.

use std::sync::Arc;

use pane_stack::{
    ArrangementArgs, Context, ContextKind, ContextStack, ContextTree, GuiConfig, LayoutRegistry,
    OnFocusOpts, Size, ViewTable, window_dimensions,
};

fn stack() -> ContextStack {
    let contexts = vec![
        Context::builder("status", ContextKind::Side, "status").build(),
        Context::builder("files", ContextKind::Side, "files").build(),
        Context::builder("branches", ContextKind::Side, "branches").build(),
        Context::builder("commits", ContextKind::Side, "commits").build(),
        Context::builder("stash", ContextKind::Side, "stash").build(),
        Context::builder("normal", ContextKind::Main, "main").build(),
        Context::builder("menu", ContextKind::TemporaryPopup, "menu").build(),
    ];
    let views = Arc::new(ViewTable::with_views(
        contexts.iter().map(|context| context.view_name()),
    ));
    let tree = ContextTree::new(contexts, "files").unwrap();
    ContextStack::new(tree, views)
}

fn focus(stack: &ContextStack, key: &str) {
    let context = stack.context_for_key(key).unwrap();
    stack.push(&context, OnFocusOpts::default()).unwrap();
}

fn args(stack: &ContextStack, size: Size, config: GuiConfig) -> ArrangementArgs {
    ArrangementArgs {
        size,
        config,
        windows: stack.focus_windows(),
        ..ArrangementArgs::default()
    }
}

#[test]
fn popup_keeps_the_side_panel_behind_it_expanded() {
    let stack = stack();
    let config = GuiConfig {
        expand_focused_side_panel: true,
        ..GuiConfig::default()
    };

    focus(&stack, "commits");
    let expanded = window_dimensions(&args(&stack, Size::new(75, 30), config.clone()));
    assert!(expanded["commits"].height() > expanded["files"].height());

    focus(&stack, "menu");
    let windows = stack.focus_windows();
    assert_eq!(windows.current, "menu");
    assert_eq!(windows.current_side, "commits");

    let with_popup = window_dimensions(&args(&stack, Size::new(75, 30), config));
    assert_eq!(with_popup["commits"], expanded["commits"]);
}

#[test]
fn resize_marks_only_moved_windows_dirty() {
    let stack = stack();
    focus(&stack, "files");
    let mut registry = LayoutRegistry::new();

    let first = window_dimensions(&args(&stack, Size::new(120, 40), GuiConfig::default()));
    registry.sync_layout(&first);
    let dirty = registry.take_dirty();
    assert_eq!(dirty.len(), first.len());
    assert!(dirty.iter().any(|(window, _)| window == "main"));

    registry.sync_layout(&first);
    assert!(!registry.has_dirty());

    let resized = window_dimensions(&args(&stack, Size::new(160, 40), GuiConfig::default()));
    registry.sync_layout(&resized);
    let dirty: Vec<_> = registry
        .take_dirty()
        .into_iter()
        .map(|(window, _)| window)
        .collect();
    assert!(dirty.contains(&"main".to_string()));
    assert!(dirty.contains(&"limit".to_string()));
    assert_eq!(
        registry.dimensions_of("main"),
        resized.get("main").copied()
    );
}
