// Tile: one clickable region of the tableau.
use super::TileColor;

/// Rectangular region in board-local coordinates. The rectangle and point value
/// are fixed at creation; color and recolor period change during play.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    points: u32,
    pub color: TileColor,
    /// Recolor period in ticks. `None` until the first recolor.
    pub refresh_in_ticks: Option<u32>,
}

impl Tile {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            points: 1,
            color: TileColor::Uncolored,
            refresh_in_ticks: None,
        }
    }

    /// Point values below one are raised to one.
    pub const fn with_points(mut self, points: u32) -> Self {
        self.points = if points == 0 { 1 } else { points };
        self
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn is_colored(&self) -> bool {
        self.color.is_colored()
    }

    /// Bounds are inclusive on every edge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }

    /// Whether the tile recolors on this tick. Periods count from tick zero,
    /// not from the tile's last recolor.
    pub fn is_due(&self, tick: u64) -> bool {
        match self.refresh_in_ticks {
            None => true,
            Some(period) => tick % u64::from(period.max(1)) == 0,
        }
    }
}
