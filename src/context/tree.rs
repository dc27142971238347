//! Registry of every context built at startup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{PaneError, Result};

use super::core::{Context, ContextKey, ContextKind};

/// Every context known to the application, stacked or not.
///
/// Built once at startup and immutable afterwards, so lookups need no lock.
#[derive(Debug, Clone)]
pub struct ContextTree {
    contexts: Vec<Arc<Context>>,
    by_key: HashMap<ContextKey, usize>,
    default_key: ContextKey,
}

impl ContextTree {
    /// `default_key` names the side context that serves as the stack's floor.
    pub fn new(
        contexts: impl IntoIterator<Item = Arc<Context>>,
        default_key: impl Into<ContextKey>,
    ) -> Result<Self> {
        let default_key = default_key.into();
        let mut tree = Self {
            contexts: Vec::new(),
            by_key: HashMap::new(),
            default_key,
        };

        for context in contexts {
            if tree.by_key.contains_key(context.key()) {
                return Err(PaneError::DuplicateContext(context.key().clone()));
            }
            tree.by_key.insert(context.key().clone(), tree.contexts.len());
            tree.contexts.push(context);
        }

        let floor_is_side = tree
            .get(&tree.default_key)
            .is_some_and(|default| default.kind() == ContextKind::Side);
        if !floor_is_side {
            return Err(PaneError::InvalidDefaultContext(tree.default_key));
        }
        Ok(tree)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Context>> {
        self.by_key.get(key).map(|idx| &self.contexts[*idx])
    }

    pub fn default_context(&self) -> &Arc<Context> {
        // presence is checked in `new`
        &self.contexts[self.by_key[&self.default_key]]
    }

    /// Contexts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Context>> {
        self.contexts.iter()
    }

    pub fn of_kind(&self, kind: ContextKind) -> impl Iterator<Item = &Arc<Context>> {
        self.contexts.iter().filter(move |context| context.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(key: &str) -> Arc<Context> {
        Context::builder(key, ContextKind::Side, key).build()
    }

    #[test]
    fn lookup_by_key_and_kind() {
        let menu = Context::builder("menu", ContextKind::TemporaryPopup, "menu").build();
        let tree = ContextTree::new([side("files"), side("branches"), menu], "files").unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get("menu").unwrap().kind(), ContextKind::TemporaryPopup);
        assert!(tree.get("missing").is_none());
        assert_eq!(tree.default_context().key(), "files");
        assert_eq!(tree.of_kind(ContextKind::Side).count(), 2);

        let keys: Vec<_> = tree.iter().map(|context| context.key().as_str()).collect();
        assert_eq!(keys, vec!["files", "branches", "menu"]);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = ContextTree::new([side("files"), side("files")], "files").unwrap_err();
        assert!(matches!(err, PaneError::DuplicateContext(key) if key == "files"));
    }

    #[test]
    fn default_must_exist_and_be_a_side_context() {
        let err = ContextTree::new([side("files")], "status").unwrap_err();
        assert!(matches!(err, PaneError::InvalidDefaultContext(_)));

        let main = Context::builder("main", ContextKind::Main, "main").build();
        let err = ContextTree::new([side("files"), main], "main").unwrap_err();
        assert!(matches!(err, PaneError::InvalidDefaultContext(_)));
    }
}
