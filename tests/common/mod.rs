// Shared test doubles for driving a `GameSession` natively.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tableau_destroyer::{
    Artwork, Board, ButtonMask, Clock, GameSession, HighScoreLedger, MemoryStore, PointerSink,
    Surface, SurfaceError, Tile, TileColor,
};

/// Clock moved by hand. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn epoch_ms(&self) -> f64 {
        1_700_000_000_000.0 + self.now.get()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear,
    Artwork(Artwork, f64, f64),
    FillRect(String, f64, f64, f64, f64),
    Text(String, f64, f64),
    Stroke(String),
}

/// Surface that records what was drawn. Text is 10px per character wide.
#[derive(Default)]
pub struct RecordingSurface {
    pub tableau: Option<(f64, f64)>,
    pub logo: Option<(f64, f64)>,
    pub ops: Vec<Op>,
    fill: String,
}

impl RecordingSurface {
    pub fn loaded() -> Self {
        Self {
            tableau: Some((1152.0, 648.0)),
            logo: Some((400.0, 200.0)),
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::FillRect(..)))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn artwork_size(&self, art: Artwork) -> Option<(f64, f64)> {
        match art {
            Artwork::Tableau => self.tableau,
            Artwork::Logo => self.logo,
        }
    }

    fn draw_artwork(&mut self, art: Artwork, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ops.push(Op::Artwork(art, x, y));
        Ok(())
    }

    fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.ops.push(Op::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::FillRect(self.fill.clone(), x, y, width, height));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.fill = style.to_owned();
    }

    fn set_stroke_style(&mut self, _style: &str) {}

    fn set_font(&mut self, _font: &str) {}

    fn set_text_baseline(&mut self, _baseline: &str) {}

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ops.push(Op::Text(text.to_owned(), x, y));
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, _x: f64, _y: f64) -> Result<(), SurfaceError> {
        self.ops.push(Op::Stroke(text.to_owned()));
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        Ok(text.chars().count() as f64 * 10.0)
    }
}

/// Three side-by-side 100x100 tiles worth 5, 3 and 40 points.
pub fn test_board() -> Board {
    Board::with_tiles(vec![
        Tile::new(0.0, 0.0, 100.0, 100.0).with_points(5),
        Tile::new(200.0, 0.0, 100.0, 100.0).with_points(3),
        Tile::new(400.0, 0.0, 100.0, 100.0).with_points(40),
    ])
}

pub struct Harness {
    pub session: GameSession,
    pub sink: PointerSink,
    pub clock: ManualClock,
    pub store: MemoryStore,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let clock = ManualClock::default();
        let ledger = HighScoreLedger::load(Box::new(store.clone()));
        let mut session = GameSession::with_board(
            test_board(),
            ledger,
            Box::new(clock.clone()),
            fastrand::Rng::with_seed(42),
        );
        let sink = session.hook_input();
        Self {
            session,
            sink,
            clock,
            store,
        }
    }

    /// Point at a board-local position.
    pub fn point_at(&self, x: f64, y: f64) {
        let (bx, by) = self.session.board().origin();
        self.sink.move_to(x + bx, y + by);
    }

    /// Press and release the left button over a board-local position.
    pub fn click(&mut self, x: f64, y: f64) {
        self.point_at(x, y);
        self.sink.set_buttons(ButtonMask::new(ButtonMask::LEFT));
        self.session.update(10.0);
        self.sink.set_buttons(ButtonMask::new(0));
        self.session.update(10.0);
    }

    /// Click to start and let the countdown run out.
    pub fn start_playing(&mut self) {
        self.click(-500.0, -500.0);
        for _ in 0..3 {
            self.clock.advance(1000.0);
            self.session.update(10.0);
        }
    }

    /// Fix a tile's color and keep the scheduler away from it.
    pub fn pin(&mut self, index: usize, color: TileColor) {
        let tile = &mut self.session.board_mut().tiles_mut()[index];
        tile.color = color;
        tile.refresh_in_ticks = Some(u32::MAX);
    }
}
