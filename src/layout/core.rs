//! Box layout solver.
//!
//! A [`LayoutBox`] tree is rebuilt on every pass and resolved by
//! [`arrange_windows`] into one inclusive rectangle per window. Statics are
//! honoured first; weighted siblings split the rest with no cell lost.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::geometry::Dimensions;

/// How a box arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Children are stacked on top of each other, dividing the height.
    Row,
    /// Children sit side by side, dividing the width.
    Column,
}

/// Sizing rule along the parent's divided axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Absolute length, honoured before any weighted sibling.
    Static(i32),
    /// Proportional share of what the static siblings leave behind.
    Weight(i32),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Weight(1)
    }
}

/// Picks a direction from the width/height assigned to the box.
pub type DirectionFn = Arc<dyn Fn(i32, i32) -> Direction + Send + Sync>;

/// Produces children from the width/height assigned to the box.
pub type ChildrenFn = Arc<dyn Fn(i32, i32) -> Vec<LayoutBox> + Send + Sync>;

/// Node of a layout description tree.
///
/// Leaves name the window they stand for; internal nodes divide their space
/// among children. Trees are rebuilt on every layout pass.
#[derive(Clone, Default)]
pub struct LayoutBox {
    pub direction: Option<Direction>,
    pub direction_fn: Option<DirectionFn>,
    pub children: Vec<LayoutBox>,
    pub children_fn: Option<ChildrenFn>,
    pub window: Option<String>,
    pub sizing: Sizing,
}

impl LayoutBox {
    pub fn window(name: impl Into<String>) -> Self {
        Self {
            window: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn row(children: Vec<LayoutBox>) -> Self {
        Self::container(Direction::Row, children)
    }

    pub fn column(children: Vec<LayoutBox>) -> Self {
        Self::container(Direction::Column, children)
    }

    pub fn container(direction: Direction, children: Vec<LayoutBox>) -> Self {
        Self {
            direction: Some(direction),
            children,
            ..Self::default()
        }
    }

    /// Container whose children are decided once its own span is known.
    pub fn conditional<F>(direction: Direction, children: F) -> Self
    where
        F: Fn(i32, i32) -> Vec<LayoutBox> + Send + Sync + 'static,
    {
        Self {
            direction: Some(direction),
            children_fn: Some(Arc::new(children)),
            ..Self::default()
        }
    }

    pub fn direction_fn<F>(mut self, direction: F) -> Self
    where
        F: Fn(i32, i32) -> Direction + Send + Sync + 'static,
    {
        self.direction_fn = Some(Arc::new(direction));
        self
    }

    pub fn size(mut self, size: i32) -> Self {
        self.sizing = Sizing::Static(size);
        self
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.sizing = Sizing::Weight(weight);
        self
    }

    pub fn is_static(&self) -> bool {
        matches!(self.sizing, Sizing::Static(_))
    }

    fn resolved_children(&self, width: i32, height: i32) -> Vec<LayoutBox> {
        match &self.children_fn {
            Some(children) => children(width, height),
            None => self.children.clone(),
        }
    }

    fn resolved_direction(&self, width: i32, height: i32) -> Direction {
        match &self.direction_fn {
            Some(direction) => direction(width, height),
            None => self.direction.unwrap_or(Direction::Row),
        }
    }
}

impl fmt::Debug for LayoutBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutBox")
            .field("window", &self.window)
            .field("direction", &self.direction)
            .field("conditional_direction", &self.direction_fn.is_some())
            .field("children", &self.children)
            .field("conditional_children", &self.children_fn.is_some())
            .field("sizing", &self.sizing)
            .finish()
    }
}

/// Resolve a layout tree into one rectangle per window.
///
/// The origin only advances along the divided axis; the cross axis keeps the
/// parent's full span. Weighted siblings exactly partition what's left after
/// the statics, with earlier siblings absorbing the rounding remainder.
pub fn arrange_windows(
    root: &LayoutBox,
    x0: i32,
    y0: i32,
    width: i32,
    height: i32,
) -> HashMap<String, Dimensions> {
    let mut result = HashMap::new();
    arrange_into(root, x0, y0, width, height, &mut result);
    result
}

fn arrange_into(
    node: &LayoutBox,
    x0: i32,
    y0: i32,
    width: i32,
    height: i32,
    accum: &mut HashMap<String, Dimensions>,
) {
    let children = node.resolved_children(width, height);
    if children.is_empty() {
        if let Some(window) = &node.window {
            accum.insert(window.clone(), Dimensions::from_span(x0, y0, width, height));
        }
        return;
    }

    let direction = node.resolved_direction(width, height);
    let available = match direction {
        Direction::Row => height,
        Direction::Column => width,
    };

    let sizes = distribute(&children, available);

    let mut offset: i32 = 0;
    for (child, span) in children.iter().zip(sizes) {
        match direction {
            Direction::Row => {
                arrange_into(child, x0, y0.saturating_add(offset), width, span, accum)
            }
            Direction::Column => {
                arrange_into(child, x0.saturating_add(offset), y0, span, height, accum)
            }
        }
        offset = offset.saturating_add(span);
    }
}

/// Split `available` cells among `boxes` along one axis.
pub(crate) fn distribute(boxes: &[LayoutBox], available: i32) -> Vec<i32> {
    let available = available.max(0);

    let mut reserved: i32 = 0;
    let mut total_weight: i32 = 0;
    for child in boxes {
        match child.sizing {
            Sizing::Static(size) => reserved = reserved.saturating_add(size.max(0)),
            Sizing::Weight(weight) => {
                total_weight = total_weight.saturating_add(weight.max(0));
            }
        }
    }

    let remaining = (available - reserved).max(0);
    let (unit, mut extra) = if total_weight > 0 {
        (remaining / total_weight, remaining % total_weight)
    } else {
        (0, 0)
    };

    boxes
        .iter()
        .map(|child| match child.sizing {
            // only an oversized static child can exceed the axis; crop it
            Sizing::Static(size) => size.max(0).min(available),
            Sizing::Weight(weight) => {
                let weight = weight.max(0);
                let absorbed = extra.min(weight);
                extra -= absorbed;
                unit.saturating_mul(weight).saturating_add(absorbed)
            }
        })
        .collect()
}
