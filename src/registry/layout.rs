//! Dimensions kept between layout passes.

use std::collections::{BTreeSet, HashMap};

use crate::geometry::Dimensions;

/// Dimensions from the previous layout pass, with change tracking.
///
/// The renderer only needs to move or resize the windows reported dirty.
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    entries: HashMap<String, Dimensions>,
    dirty: BTreeSet<String>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a freshly resolved layout and flag what moved.
    pub fn sync_layout(&mut self, solved: &HashMap<String, Dimensions>) {
        for (window, dims) in solved {
            match self.entries.insert(window.clone(), *dims) {
                Some(previous) if previous == *dims => {}
                _ => {
                    self.dirty.insert(window.clone());
                }
            }
        }

        // windows that vanished from the layout
        self.entries.retain(|window, _| solved.contains_key(window));
        self.dirty.retain(|window| solved.contains_key(window));
    }

    /// Drain dirty windows in name order.
    pub fn take_dirty(&mut self) -> Vec<(String, Dimensions)> {
        let dirty = std::mem::take(&mut self.dirty);
        dirty
            .into_iter()
            .filter_map(|window| {
                let dims = self.entries.get(&window).copied()?;
                Some((window, dims))
            })
            .collect()
    }

    pub fn dimensions_of(&self, window: &str) -> Option<Dimensions> {
        self.entries.get(window).copied()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(entries: &[(&str, Dimensions)]) -> HashMap<String, Dimensions> {
        entries
            .iter()
            .map(|(window, dims)| (window.to_string(), *dims))
            .collect()
    }

    #[test]
    fn new_windows_start_dirty() {
        let mut registry = LayoutRegistry::new();
        registry.sync_layout(&layout(&[
            ("main", Dimensions::new(25, 0, 74, 28)),
            ("files", Dimensions::new(0, 0, 24, 28)),
        ]));

        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 2);
        assert_eq!(dirty[0].0, "files");
        assert!(!registry.has_dirty());
    }

    #[test]
    fn only_moved_windows_become_dirty() {
        let mut registry = LayoutRegistry::new();
        registry.sync_layout(&layout(&[
            ("main", Dimensions::new(25, 0, 74, 28)),
            ("files", Dimensions::new(0, 0, 24, 28)),
        ]));
        registry.take_dirty();

        registry.sync_layout(&layout(&[
            ("main", Dimensions::new(30, 0, 74, 28)),
            ("files", Dimensions::new(0, 0, 24, 28)),
        ]));
        let dirty = registry.take_dirty();
        assert_eq!(dirty, vec![("main".to_string(), Dimensions::new(30, 0, 74, 28))]);
    }

    #[test]
    fn vanished_windows_are_forgotten() {
        let mut registry = LayoutRegistry::new();
        registry.sync_layout(&layout(&[
            ("main", Dimensions::new(25, 0, 74, 28)),
            ("secondary", Dimensions::new(50, 0, 74, 28)),
        ]));
        registry.sync_layout(&layout(&[("main", Dimensions::new(25, 0, 74, 28))]));

        assert!(registry.dimensions_of("secondary").is_none());
        assert_eq!(registry.len(), 1);
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].0, "main");
    }
}
