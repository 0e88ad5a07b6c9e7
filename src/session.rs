//! Game session: score, countdown / playing / game-over state machine, per-tick
//! simulation and render orchestration.
//!
//! Two time bases are kept apart. The countdown is paced by the wall clock
//! ([`Clock::now_ms`]); everything the board does is paced by `tick_count`,
//! which advances once per [`GameSession::update`] call.

use crate::board::{Board, TileColor};
use crate::config::{
    BANNER_FONT, COUNTDOWN_SECONDS, COUNTDOWN_STEP_MS, DEFAULT_PLAYER_NAME, LEDGER_DISPLAY_ROWS,
    LEDGER_FONT, LEDGER_NAME_MAX_CHARS, SCORE_DECAY_INTERVAL_MS, SCORE_FONT, TEXT_FILL,
    TEXT_STROKE, TITLE_FONT,
};
use crate::input::{InputSampler, PointerSink};
use crate::ledger::{HighScoreEntry, HighScoreLedger};
use crate::surface::{Artwork, Surface, SurfaceError};

/// Time sources consumed by the session.
pub trait Clock {
    /// Monotonic milliseconds, used for countdown pacing.
    fn now_ms(&self) -> f64;
    /// Milliseconds since the Unix epoch, used to stamp high scores.
    fn epoch_ms(&self) -> f64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotStarted,
    Countdown,
    Playing,
    GameOver,
}

/// Placement of the game container on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What a tile tap did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Claimed { points: u32 },
    Missed { points: u32 },
    Penalty,
    Bomb,
}

pub struct GameSession {
    input: InputSampler,
    board: Board,
    ledger: HighScoreLedger,
    clock: Box<dyn Clock>,
    rng: fastrand::Rng,
    viewport: Viewport,
    state: SessionState,
    score: i64,
    elapsed_ms: f64,
    tick_count: u64,
    countdown_remaining: u32,
    countdown_started_ms: f64,
}

impl GameSession {
    pub fn new(ledger: HighScoreLedger, clock: Box<dyn Clock>, rng: fastrand::Rng) -> Self {
        Self::with_board(Board::new(), ledger, clock, rng)
    }

    pub fn with_board(
        board: Board,
        ledger: HighScoreLedger,
        clock: Box<dyn Clock>,
        rng: fastrand::Rng,
    ) -> Self {
        Self {
            input: InputSampler::new(),
            board,
            ledger,
            clock,
            rng,
            viewport: Viewport::default(),
            state: SessionState::NotStarted,
            score: 0,
            elapsed_ms: 0.0,
            tick_count: 0,
            countdown_remaining: 0,
            countdown_started_ms: 0.0,
        }
    }

    // --- accessors ---

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    pub fn countdown(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn ledger(&self) -> &HighScoreLedger {
        &self.ledger
    }

    pub fn input(&self) -> &InputSampler {
        &self.input
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // --- lifecycle ---

    pub fn hook_input(&mut self) -> PointerSink {
        self.input.hook()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Reset score, timers and tiles, and begin the countdown.
    pub fn start(&mut self) {
        self.state = SessionState::Countdown;
        self.score = 0;
        self.elapsed_ms = 0.0;
        self.tick_count = 0;
        self.board.setup_tiles();
        self.countdown_started_ms = self.clock.now_ms();
        self.countdown_remaining = COUNTDOWN_SECONDS;
        log::debug!("session started, countdown {COUNTDOWN_SECONDS}");
    }

    pub fn stop(&mut self) {
        self.state = SessionState::NotStarted;
    }

    /// Detach input and drop board tiles. The session can be started again
    /// after hooking new input.
    pub fn uninitialize(&mut self) {
        self.stop();
        self.input.unhook();
        self.board.clear();
    }

    // --- simulation ---

    /// One fixed simulation step covering `dt_ms` of elapsed time.
    pub fn update(&mut self, dt_ms: f64) {
        let (bx, by) = self.board.origin();
        self.input.sample((self.viewport.x + bx, self.viewport.y + by));

        if self.state == SessionState::Countdown {
            self.step_countdown();
        }

        match self.state {
            SessionState::Playing => self.step_playing(dt_ms),
            SessionState::NotStarted | SessionState::GameOver if self.input.clicked() => {
                self.stop();
                self.start();
            }
            _ => {}
        }

        self.tick_count += 1;
    }

    fn step_countdown(&mut self) {
        let now = self.clock.now_ms();
        if now - self.countdown_started_ms < COUNTDOWN_STEP_MS {
            return;
        }
        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        self.countdown_started_ms = now;
        if self.countdown_remaining == 0 {
            self.state = SessionState::Playing;
            log::debug!("countdown finished");
        }
    }

    fn step_playing(&mut self, dt_ms: f64) {
        self.board.advance(self.tick_count, &mut self.rng);

        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= SCORE_DECAY_INTERVAL_MS {
            self.score -= 1;
            self.elapsed_ms -= SCORE_DECAY_INTERVAL_MS;
        }

        if self.input.clicked() {
            let cur = self.input.current_state();
            if let Some(index) = self.board.tile_at(cur.x, cur.y) {
                self.on_tile_tapped(index);
            }
        }
    }

    /// Apply the scoring rule for tile `index`. Out-of-range indices are ignored.
    pub fn on_tile_tapped(&mut self, index: usize) -> Option<TapOutcome> {
        let tile = self.board.tiles_mut().get_mut(index)?;
        let points = tile.points();
        let outcome = match tile.color {
            TileColor::Penalty => {
                self.score -= 1;
                TapOutcome::Penalty
            }
            TileColor::Bomb => TapOutcome::Bomb,
            TileColor::Uncolored => {
                self.score -= i64::from(points);
                TapOutcome::Missed { points }
            }
            TileColor::Red | TileColor::Yellow | TileColor::Blue => {
                self.score += i64::from(points);
                tile.color = TileColor::Penalty;
                TapOutcome::Claimed { points }
            }
        };
        if outcome == TapOutcome::Bomb {
            self.game_over();
        }
        Some(outcome)
    }

    fn game_over(&mut self) {
        self.state = SessionState::GameOver;
        log::info!("game over with score {}", self.score);
        let entry = HighScoreEntry::new(self.score, self.clock.epoch_ms(), DEFAULT_PLAYER_NAME);
        if let Err(err) = self.ledger.record(entry) {
            log::error!("failed to save high scores: {err}");
        }
    }

    // --- rendering ---

    /// Render the current state. Reads state only.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        surface.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        self.board.draw(surface)?;

        let (bw, bh) = surface.artwork_size(Artwork::Tableau).unwrap_or_default();
        let (bx, by) = self.board.origin();
        let center = (bx + bw / 2.0, by + bh / 2.0);

        surface.set_fill_style(TEXT_FILL);
        surface.set_stroke_style(TEXT_STROKE);
        surface.set_text_baseline("top");

        match self.state {
            SessionState::NotStarted => {
                if let Some((lw, lh)) = surface.artwork_size(Artwork::Logo) {
                    surface.draw_artwork(Artwork::Logo, center.0 - lw / 2.0, center.1 - lh / 2.0)?;
                }
                surface.set_font(TITLE_FONT);
                outlined_text_centered(surface, "Click to start", center.0, center.1 + 50.0)?;
            }
            SessionState::Countdown => {
                surface.set_font(BANNER_FONT);
                let digit = self.countdown_remaining.to_string();
                outlined_text_centered(surface, &digit, center.0, center.1 - 20.0)?;
            }
            SessionState::GameOver => {
                surface.set_font(BANNER_FONT);
                outlined_text_centered(surface, "Game Over", center.0, center.1 - 20.0)?;
            }
            SessionState::Playing => {}
        }

        let side_x = bx + bw + 20.0;
        surface.set_font(SCORE_FONT);
        surface.fill_text(&format!("Score: {}", self.score), side_x, by)?;
        surface.fill_text("Hiscores", side_x, by + 50.0)?;

        surface.set_font(LEDGER_FONT);
        for rank in 1..=LEDGER_DISPLAY_ROWS {
            let row = ledger_row(rank, self.ledger.entries().get(rank - 1));
            surface.fill_text(&row, side_x, by + 60.0 + rank as f64 * 30.0)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("tick_count", &self.tick_count)
            .field("countdown_remaining", &self.countdown_remaining)
            .finish_non_exhaustive()
    }
}

/// `"<rank>. <name>: <score>"`, or just `"<rank>. "` for an empty slot.
pub fn ledger_row(rank: usize, entry: Option<&HighScoreEntry>) -> String {
    match entry {
        Some(e) => {
            let name: String = e.name.chars().take(LEDGER_NAME_MAX_CHARS).collect();
            format!("{rank}. {name}: {}", e.score)
        }
        None => format!("{rank}. "),
    }
}

fn outlined_text_centered(
    surface: &mut dyn Surface,
    text: &str,
    center_x: f64,
    y: f64,
) -> Result<(), SurfaceError> {
    let x = center_x - surface.measure_text(text)? / 2.0;
    surface.fill_text(text, x, y)?;
    surface.stroke_text(text, x, y)
}
