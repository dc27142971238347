//! Stacking rules as pure functions over a stack snapshot.
//!
//! The stack manager applies these under its write lock and runs the
//! resulting deactivations once the lock is released.

use std::sync::Arc;

use super::core::{Context, ContextKind, SEARCH_CONTEXT_KEY};

/// Outcome of a stack mutation: the new stack and whom to deactivate.
#[derive(Debug, Clone, Default)]
pub struct Transition {
    pub stack: Vec<Arc<Context>>,
    pub evicted: Vec<Arc<Context>>,
}

impl Transition {
    pub fn evicted_keys(&self) -> Vec<&str> {
        self.evicted.iter().map(|context| context.key().as_str()).collect()
    }

    pub fn stack_keys(&self) -> Vec<&str> {
        self.stack.iter().map(|context| context.key().as_str()).collect()
    }
}

/// Whether pushing `incoming` closes the current `top` first.
pub fn evicts_top(top: &Context, incoming: &Context) -> bool {
    let temporary_top =
        top.kind() == ContextKind::TemporaryPopup && incoming.key() != SEARCH_CONTEXT_KEY;
    let main_over_main = top.kind() == ContextKind::Main && incoming.kind() == ContextKind::Main;
    temporary_top || main_over_main
}

/// Plan a push. The caller has already ruled out pushing the current top.
pub fn plan_push(stack: &[Arc<Context>], incoming: &Arc<Context>) -> Transition {
    let Some(top) = stack.last() else {
        return Transition {
            stack: vec![incoming.clone()],
            evicted: Vec::new(),
        };
    };

    match incoming.kind() {
        ContextKind::Side => Transition {
            stack: vec![incoming.clone()],
            evicted: stack
                .iter()
                .filter(|context| context.key() != incoming.key())
                .cloned()
                .collect(),
        },
        ContextKind::Main => {
            let mut remaining = stack.to_vec();
            let mut evicted = Vec::new();
            if evicts_top(top, incoming) {
                evicted.extend(remaining.pop());
            }

            let (mains, mut kept): (Vec<_>, Vec<_>) = remaining
                .into_iter()
                .partition(|context| context.kind() == ContextKind::Main);
            evicted.extend(
                mains
                    .into_iter()
                    .filter(|context| context.key() != incoming.key()),
            );
            kept.push(incoming.clone());
            Transition {
                stack: kept,
                evicted,
            }
        }
        _ => {
            let mut next = stack.to_vec();
            let mut evicted = Vec::new();
            if evicts_top(top, incoming) {
                evicted.extend(next.pop());
            }
            next.push(incoming.clone());
            Transition {
                stack: next,
                evicted,
            }
        }
    }
}

/// Plan a pop. `None` when the stack is down to its floor.
pub fn plan_pop(stack: &[Arc<Context>]) -> Option<Transition> {
    if stack.len() <= 1 {
        return None;
    }
    let mut next = stack.to_vec();
    let evicted: Vec<_> = next.pop().into_iter().collect();
    Some(Transition {
        stack: next,
        evicted,
    })
}

/// Plan removing every context whose key is listed. The bottom entry is
/// never removed, so the result is never empty. `None` when nothing changes.
pub fn plan_remove(stack: &[Arc<Context>], keys: &[&str]) -> Option<Transition> {
    if stack.len() <= 1 {
        return None;
    }

    let mut next = Vec::with_capacity(stack.len());
    let mut evicted = Vec::new();
    for (idx, context) in stack.iter().enumerate() {
        if idx > 0 && keys.contains(&context.key().as_str()) {
            evicted.push(context.clone());
        } else {
            next.push(context.clone());
        }
    }

    if evicted.is_empty() {
        return None;
    }
    Some(Transition {
        stack: next,
        evicted,
    })
}
