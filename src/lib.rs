//! Tableau Destroyer core crate.
//!
//! A background tableau is split into fixed regions that light up in random
//! colors. Clicking a lit region scores its points, clicking a blank one costs
//! them, and clicking a bomb ends the run. Gameplay (input sampling, board
//! scheduling, the session state machine and the high-score ledger) is plain
//! Rust and runs natively under `cargo test`; [`web`] binds it to the browser.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod board;
pub mod config;
pub mod input;
pub mod ledger;
pub mod session;
pub mod surface;
pub mod web;

pub use board::{Board, PALETTE, Tile, TileColor};
pub use input::{ButtonMask, InputSampler, InputSnapshot, PointerSink};
pub use ledger::{HighScoreEntry, HighScoreLedger, KeyValueStore, LedgerError, MemoryStore};
pub use session::{Clock, GameSession, SessionState, TapOutcome, Viewport};
pub use surface::{Artwork, Surface, SurfaceError};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount the game into the element with the given id.
#[wasm_bindgen]
pub fn start_game(container_id: &str) -> Result<(), JsValue> {
    web::start(container_id)
}

/// Tear the game down: stops both loops, unhooks input, removes the canvas.
#[wasm_bindgen]
pub fn stop_game() {
    web::stop();
}
