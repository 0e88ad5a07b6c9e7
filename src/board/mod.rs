//! Tableau board: the fixed tile layout over the background image and the
//! per-tile recolor scheduler.
//!
//! Every tick the board walks its tiles and recolors the ones that are due. A
//! tile is due when it has no period yet, or when the absolute tick count is a
//! multiple of its period. Recoloring draws a fresh period in
//! `[REFRESH_MIN_TICKS, REFRESH_MAX_TICKS)` and an independent color from
//! [`PALETTE`], so tiles drift out of phase without storing deadlines.

use crate::config::{BOARD_ORIGIN, REFRESH_MAX_TICKS, REFRESH_MIN_TICKS};
use crate::surface::{Artwork, Surface, SurfaceError};

mod layout;
mod tile;

pub use layout::{TABLEAU_LAYOUT, tableau_tiles};
pub use tile::Tile;

/// Color outcome of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileColor {
    #[default]
    Uncolored,
    Red,
    Yellow,
    Blue,
    /// Ends the session when tapped.
    Bomb,
    /// Costs a point when tapped. Claimed tiles turn into this.
    Penalty,
}

impl TileColor {
    pub fn is_colored(self) -> bool {
        !matches!(self, TileColor::Uncolored)
    }

    /// Canvas fill style, `None` for uncolored tiles.
    pub fn css(self) -> Option<&'static str> {
        match self {
            TileColor::Uncolored => None,
            TileColor::Red => Some("red"),
            TileColor::Yellow => Some("yellow"),
            TileColor::Blue => Some("blue"),
            TileColor::Bomb => Some("black"),
            TileColor::Penalty => Some("purple"),
        }
    }
}

/// Recolor outcomes, drawn uniformly. Half the slots leave the tile blank.
pub const PALETTE: [TileColor; 16] = {
    use TileColor::*;
    [
        Red, Uncolored, Yellow, Uncolored, Blue, Uncolored, Bomb, Uncolored, Red, Uncolored,
        Yellow, Uncolored, Blue, Uncolored, Bomb, Uncolored,
    ]
};

#[derive(Debug)]
pub struct Board {
    pub x: f64,
    pub y: f64,
    layout: Vec<Tile>,
    tiles: Vec<Tile>,
    palette: &'static [TileColor],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self::with_tiles(tableau_tiles())
    }

    /// Board over an arbitrary layout, at the standard origin.
    pub fn with_tiles(layout: Vec<Tile>) -> Self {
        Self {
            x: BOARD_ORIGIN.0,
            y: BOARD_ORIGIN.1,
            tiles: layout.clone(),
            layout,
            palette: &PALETTE,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Restore the layout: every tile blank and due on the next tick.
    pub fn setup_tiles(&mut self) {
        self.tiles = self.layout.clone();
        for tile in &mut self.tiles {
            tile.color = TileColor::Uncolored;
            tile.refresh_in_ticks = None;
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Recolor every tile that is due on `tick`. Returns how many were recolored.
    pub fn advance(&mut self, tick: u64, rng: &mut fastrand::Rng) -> usize {
        let mut recolored = 0;
        for tile in &mut self.tiles {
            if tile.is_due(tick) {
                tile.refresh_in_ticks = Some(rng.u32(REFRESH_MIN_TICKS..REFRESH_MAX_TICKS));
                tile.color = self.palette[rng.usize(..self.palette.len())];
                recolored += 1;
            }
        }
        recolored
    }

    /// Index of the first tile containing the board-local point.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        self.tiles.iter().position(|t| t.contains(x, y))
    }

    /// Background image, then every colored tile on top. Nothing is drawn while
    /// the tableau image is unavailable.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        if surface.artwork_size(Artwork::Tableau).is_none() {
            return Ok(());
        }
        surface.draw_artwork(Artwork::Tableau, self.x, self.y)?;
        for tile in &self.tiles {
            if let Some(style) = tile.color.css() {
                surface.set_fill_style(style);
                surface.fill_rect(self.x + tile.x, self.y + tile.y, tile.width, tile.height);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64) -> Tile {
        Tile::new(x, 0.0, 10.0, 10.0)
    }

    #[test]
    fn layout_has_positive_points() {
        let board = Board::new();
        assert_eq!(board.tiles().len(), 22);
        assert!(board.tiles().iter().all(|t| t.points() >= 1));
    }

    #[test]
    fn first_advance_colors_every_tile() {
        let mut board = Board::new();
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(board.advance(0, &mut rng), 22);
        for tile in board.tiles() {
            let period = tile.refresh_in_ticks.unwrap();
            assert!((REFRESH_MIN_TICKS..REFRESH_MAX_TICKS).contains(&period));
            assert_ne!(tile.color, TileColor::Penalty);
        }
    }

    #[test]
    fn tiles_recolor_independently_by_period() {
        let mut board = Board::with_tiles(vec![square(0.0), square(20.0)]);
        board.tiles_mut()[0].refresh_in_ticks = Some(300);
        board.tiles_mut()[1].refresh_in_ticks = Some(400);
        let mut rng = fastrand::Rng::with_seed(1);

        for tick in 1..2400u64 {
            let expected = usize::from(tick % 300 == 0) + usize::from(tick % 400 == 0);
            assert_eq!(board.advance(tick, &mut rng), expected, "tick {tick}");
            // Pin the periods so the modulo check stays observable.
            board.tiles_mut()[0].refresh_in_ticks = Some(300);
            board.tiles_mut()[1].refresh_in_ticks = Some(400);
        }
    }

    #[test]
    fn setup_tiles_resets_schedule_and_colors() {
        let mut board = Board::new();
        let mut rng = fastrand::Rng::with_seed(3);
        board.advance(0, &mut rng);
        board.setup_tiles();
        assert!(board.tiles().iter().all(|t| t.refresh_in_ticks.is_none()));
        assert!(board.tiles().iter().all(|t| !t.is_colored()));
    }

    #[test]
    fn tile_at_prefers_lowest_index_on_overlap() {
        let board = Board::with_tiles(vec![square(0.0), square(5.0), square(30.0)]);
        assert_eq!(board.tile_at(7.0, 5.0), Some(0));
        assert_eq!(board.tile_at(12.0, 5.0), Some(1));
        assert_eq!(board.tile_at(25.0, 5.0), None);
    }

    #[test]
    fn palette_blank_share_is_half() {
        let blanks = PALETTE.iter().filter(|c| !c.is_colored()).count();
        assert_eq!(blanks, PALETTE.len() / 2);
        assert!(PALETTE.contains(&TileColor::Bomb));
        assert!(!PALETTE.contains(&TileColor::Penalty));
    }
}
