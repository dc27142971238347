//! Cell-based sizes and the rectangles a layout pass produces.

/// Integer size measured in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Query the attached terminal for its current size.
    ///
    /// This is the embedding boundary: the host calls it on startup and on
    /// every resize event, then feeds the result to the arrangement. It fails
    /// when no terminal is attached.
    pub fn from_terminal() -> std::io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::new(width, height))
    }
}

/// Inclusive rectangle produced by a layout pass.
///
/// `x1`/`y1` are the last column/row covered, so a zero-length span yields
/// `x1 == x0 - 1`. That is why the coordinates are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Dimensions {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build from an origin plus a width/height span.
    pub const fn from_span(x0: i32, y0: i32, width: i32, height: i32) -> Self {
        Self {
            x0,
            y0,
            x1: x0.saturating_add(width) - 1,
            y1: y0.saturating_add(height) - 1,
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}
