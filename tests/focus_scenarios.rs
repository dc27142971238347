//! End-to-end focus flows through the public API.

use std::sync::{Arc, Mutex};
use std::thread;

use pane_stack::{
    Context, ContextKind, ContextStack, ContextTree, OnFocusOpts, SEARCH_CONTEXT_KEY, ViewTable,
};

type Log = Arc<Mutex<Vec<String>>>;

fn tracked(log: &Log, key: &str, kind: ContextKind, window: &str) -> Arc<Context> {
    let focus = log.clone();
    let lost = log.clone();
    let focus_key = key.to_string();
    let lost_key = key.to_string();
    Context::builder(key, kind, key)
        .window(window)
        .on_focus(move |_| {
            focus.lock().unwrap().push(format!("+{focus_key}"));
            Ok(())
        })
        .on_focus_lost(move |opts| {
            lost.lock()
                .unwrap()
                .push(format!("-{lost_key}>{}", opts.new_context_key));
            Ok(())
        })
        .build()
}

fn build(log: &Log) -> (Arc<ContextStack>, Arc<ViewTable>) {
    let contexts = vec![
        tracked(log, "files", ContextKind::Side, "files"),
        tracked(log, "branches", ContextKind::Side, "branches"),
        tracked(log, "commits", ContextKind::Side, "commits"),
        tracked(log, "normal", ContextKind::Main, "main"),
        tracked(log, "staging", ContextKind::Main, "main"),
        tracked(log, "mergeConflicts", ContextKind::Main, "main"),
        tracked(log, "menu", ContextKind::TemporaryPopup, "menu"),
        tracked(log, "confirm", ContextKind::PersistentPopup, "main"),
        tracked(log, SEARCH_CONTEXT_KEY, ContextKind::PersistentPopup, "search"),
        tracked(log, "commandLog", ContextKind::Extras, "extras"),
    ];
    let views = Arc::new(ViewTable::with_views(
        contexts.iter().map(|context| context.view_name()),
    ));
    let tree = ContextTree::new(contexts, "files").unwrap();
    (Arc::new(ContextStack::new(tree, views.clone())), views)
}

fn push(stack: &ContextStack, key: &str) {
    let context = stack.context_for_key(key).unwrap();
    stack.push(&context, OnFocusOpts::default()).unwrap();
}

fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

#[test]
fn main_contexts_replace_each_other_and_side_resets() {
    let log = Log::default();
    let (stack, _) = build(&log);

    push(&stack, "files");
    push(&stack, "normal");
    assert_eq!(stack.stack_keys(), vec!["files", "normal"]);
    drain(&log);

    push(&stack, "staging");
    assert_eq!(stack.stack_keys(), vec!["files", "staging"]);
    assert_eq!(drain(&log), vec!["-normal>staging", "+staging"]);

    push(&stack, "branches");
    assert_eq!(stack.stack_keys(), vec!["branches"]);
    assert_eq!(
        drain(&log),
        vec!["-files>branches", "-staging>branches", "+branches"]
    );

    stack.pop().unwrap();
    assert_eq!(stack.stack_keys(), vec!["branches"]);
    assert!(drain(&log).is_empty());
}

#[test]
fn focus_lost_completes_before_focus() {
    let log = Log::default();
    let (stack, _) = build(&log);
    push(&stack, "files");
    push(&stack, "menu");
    drain(&log);

    push(&stack, "confirm");
    assert_eq!(drain(&log), vec!["-menu>confirm", "+confirm"]);
}

#[test]
fn popup_lends_window_and_returns_it() {
    let log = Log::default();
    let (stack, views) = build(&log);
    push(&stack, "files");
    push(&stack, "normal");
    assert_eq!(stack.windows().view_for_window("main"), "normal");

    push(&stack, "confirm");
    assert_eq!(stack.windows().view_for_window("main"), "confirm");
    assert!(views.is_visible("confirm"));

    stack.pop().unwrap();
    assert_eq!(stack.current().key(), "normal");
    assert_eq!(stack.windows().view_for_window("main"), "normal");
    assert!(!views.is_visible("confirm"));
}

#[test]
fn search_over_temporary_popup_returns_to_it() {
    let log = Log::default();
    let (stack, _) = build(&log);
    push(&stack, "files");
    push(&stack, "menu");
    drain(&log);

    push(&stack, SEARCH_CONTEXT_KEY);
    assert_eq!(stack.stack_keys(), vec!["files", "menu", "search"]);
    assert_eq!(drain(&log), vec!["+search"]);

    stack.pop().unwrap();
    assert_eq!(drain(&log), vec!["-search>menu", "+menu"]);
}

#[test]
fn concurrent_callers_never_observe_a_broken_stack() {
    let log = Log::default();
    let (stack, _) = build(&log);
    push(&stack, "files");

    let keys = [
        "files",
        "branches",
        "normal",
        "staging",
        "menu",
        "confirm",
        SEARCH_CONTEXT_KEY,
        "commandLog",
    ];
    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let stack = stack.clone();
            thread::spawn(move || {
                for step in 0..200 {
                    let key = keys[(worker * 7 + step * 3) % keys.len()];
                    if step % 5 == 4 {
                        stack.pop().unwrap();
                    } else {
                        push(&stack, key);
                    }

                    let mut mains = 0;
                    let mut len = 0;
                    stack.for_each(|context| {
                        len += 1;
                        if context.kind() == ContextKind::Main {
                            mains += 1;
                        }
                    });
                    assert!(len >= 1);
                    assert!(mains <= 1);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert!(!stack.is_empty());
}
