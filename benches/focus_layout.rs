use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pane_stack::logging::{LogEvent, LogSink};
use pane_stack::{
    ArrangementArgs, Context, ContextKind, ContextStack, ContextTree, Direction, FocusWindows,
    LayoutBox, Logger, LoggingResult, OnFocusOpts, Size, ViewTable, arrange_windows,
    window_dimensions,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

const CONTEXTS: [(&str, ContextKind); 7] = [
    ("files", ContextKind::Side),
    ("branches", ContextKind::Side),
    ("normal", ContextKind::Main),
    ("staging", ContextKind::Main),
    ("menu", ContextKind::TemporaryPopup),
    ("confirm", ContextKind::PersistentPopup),
    ("commandLog", ContextKind::Extras),
];

fn build_stack() -> ContextStack {
    let contexts: Vec<_> = CONTEXTS
        .iter()
        .map(|(key, kind)| Context::builder(*key, *kind, *key).build())
        .collect();
    let views = Arc::new(ViewTable::with_views(CONTEXTS.iter().map(|(key, _)| *key)));
    let tree = ContextTree::new(contexts, "files").expect("context tree");
    ContextStack::new(tree, views).with_logger(Logger::new(NullSink))
}

fn nested_layout() -> LayoutBox {
    LayoutBox::column(vec![
        LayoutBox::row(vec![
            LayoutBox::window("status").size(3),
            LayoutBox::window("files").weight(1),
            LayoutBox::window("branches").weight(1),
            LayoutBox::window("commits").weight(1),
            LayoutBox::window("stash").size(3),
        ])
        .weight(1),
        LayoutBox::conditional(Direction::Row, |width, _| {
            let mut children = vec![LayoutBox::window("main").weight(1)];
            if width > 120 {
                children.push(LayoutBox::window("secondary").weight(1));
            }
            children.push(LayoutBox::window("extras").size(8));
            children
        })
        .weight(2),
    ])
}

fn solver_nested(c: &mut Criterion) {
    let root = nested_layout();
    c.bench_function("solver_nested", |b| {
        b.iter(|| arrange_windows(black_box(&root), 0, 0, black_box(180), black_box(50)));
    });
}

fn arrangement_default(c: &mut Criterion) {
    let args = ArrangementArgs {
        size: Size::new(180, 50),
        windows: FocusWindows::uniform("files"),
        app_status: "Fetching...".to_string(),
        information: "Donate Ask Question 0.40.2".to_string(),
        ..ArrangementArgs::default()
    };
    c.bench_function("arrangement_default", |b| {
        b.iter(|| window_dimensions(black_box(&args)));
    });
}

fn stack_churn(c: &mut Criterion) {
    let stack = build_stack();
    let script: Vec<_> = ["files", "normal", "menu", "confirm", "staging", "branches"]
        .iter()
        .filter_map(|key| stack.context_for_key(key))
        .collect();
    c.bench_function("stack_churn", |b| {
        b.iter(|| {
            for context in &script {
                stack
                    .push(black_box(context), OnFocusOpts::default())
                    .expect("push");
            }
            stack.pop().expect("pop");
        });
    });
}

criterion_group!(benches, solver_nested, arrangement_default, stack_churn);
criterion_main!(benches);
