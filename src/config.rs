//! Compile-time tuning for the game loop, board scheduler, ledger and assets.

// --- Loop timing ------------------------------------------------------------

/// Period of the fixed-step update timer (~100 ticks per second).
pub const TICK_PERIOD_MS: i32 = 10;

/// Countdown shown between the click to start and the first playing tick.
pub const COUNTDOWN_SECONDS: u32 = 3;
/// Wall-clock time between two countdown digits.
pub const COUNTDOWN_STEP_MS: f64 = 1000.0;

/// One point is docked for every elapsed interval while playing.
pub const SCORE_DECAY_INTERVAL_MS: f64 = 1000.0;

// --- Board --------------------------------------------------------------------

/// Recolor period bounds in ticks, `[MIN, MAX)`.
pub const REFRESH_MIN_TICKS: u32 = 300;
pub const REFRESH_MAX_TICKS: u32 = 800;

/// Where the tableau is drawn inside the canvas.
pub const BOARD_ORIGIN: (f64, f64) = (20.0, 20.0);

// --- Ledger -------------------------------------------------------------------

pub const LEDGER_KEY: &str = "hiscores";
/// Stored entries. Matches the number of displayed rows.
pub const LEDGER_CAPACITY: usize = 10;
pub const LEDGER_DISPLAY_ROWS: usize = 10;
pub const LEDGER_NAME_MAX_CHARS: usize = 10;
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

// --- Presentation -------------------------------------------------------------

pub const TITLE_FONT: &str = "72px Comic Sans MS";
pub const BANNER_FONT: &str = "100px Arial";
pub const SCORE_FONT: &str = "32px Comic Sans MS";
pub const LEDGER_FONT: &str = "24px Comic Sans MS";
pub const TEXT_FILL: &str = "white";
pub const TEXT_STROKE: &str = "black";

pub const TABLEAU_IMAGE: &str = "img/tableau_1.png";
pub const LOGO_IMAGE: &str = "img/logo.png";

// --- Music --------------------------------------------------------------------

pub const MUSIC_VOLUME: f64 = 0.5;
pub const MUSIC_SHUFFLE: bool = true;

pub const MUSIC_TRACKS: &[&str] = &[
    "music/Blue Surprise.mp3",
    "music/Carousing every night.mp3",
    "music/Cheerful Piano.mp3",
    "music/Claim to fame.mp3",
    "music/Hypnotic.mp3",
    "music/In the circus.mp3",
    "music/Life Is A Pulse.mp3",
    "music/Missing Mysteries.mp3",
    "music/Out of my dreams.mp3",
    "music/The dance of the happy.mp3",
    "music/The lame duck.mp3",
    "music/This is war.mp3",
];
