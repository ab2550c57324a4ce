use serde::{Deserialize, Serialize};

/// Smallest width a pane may have, in pixels.
pub const MIN_PANE_WIDTH: i32 = 200;

/// Smallest height a pane may have, in pixels.
pub const MIN_PANE_HEIGHT: i32 = 150;

/// Integer rectangle in workspace pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same origin, with width and height raised to the pane minimums.
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.max(MIN_PANE_WIDTH),
            height: self.height.max(MIN_PANE_HEIGHT),
            ..self
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the point lies inside the rectangle (right/bottom exclusive).
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Grid dimensions for a terminal filling this rect, never below 1x1.
    pub fn cells(&self, cell_width: u32, cell_height: u32) -> (u16, u16) {
        let cw = cell_width.max(1) as i32;
        let ch = cell_height.max(1) as i32;
        let cols = (self.width / cw).clamp(1, u16::MAX as i32) as u16;
        let rows = (self.height / ch).clamp(1, u16::MAX as i32) as u16;
        (cols, rows)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0, 0, 800, 600)
    }
}
