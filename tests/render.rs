// What the session draws in each state.

mod common;

use common::{Harness, Op, RecordingSurface};
use tableau_destroyer::{Artwork, TileColor};

#[test]
fn title_screen_draws_board_logo_and_prompt() {
    let h = Harness::new();
    let mut surface = RecordingSurface::loaded();
    h.session.draw(&mut surface).unwrap();

    assert_eq!(surface.ops[0], Op::Clear);
    assert_eq!(surface.ops[1], Op::Artwork(Artwork::Tableau, 20.0, 20.0));
    // Logo centered on the 1152x648 tableau at (20, 20).
    assert!(surface.ops.contains(&Op::Artwork(Artwork::Logo, 396.0, 244.0)));
    // "Click to start" is 140 wide in the recording surface.
    assert!(surface.ops.contains(&Op::Text("Click to start".into(), 526.0, 394.0)));
    assert!(surface.ops.contains(&Op::Stroke("Click to start".into())));
    assert!(surface.ops.contains(&Op::Text("Score: 0".into(), 1192.0, 20.0)));
    assert!(surface.ops.contains(&Op::Text("Hiscores".into(), 1192.0, 70.0)));
    assert!(surface.fills().is_empty());
}

#[test]
fn board_is_skipped_until_tableau_loads() {
    let mut h = Harness::new();
    h.start_playing();
    h.pin(0, TileColor::Red);
    let mut surface = RecordingSurface::default();
    h.session.draw(&mut surface).unwrap();

    assert!(!surface.ops.iter().any(|op| matches!(op, Op::Artwork(..))));
    assert!(surface.fills().is_empty());
    // Side panel hugs the origin when the board has no size yet.
    assert!(surface.texts().contains(&"Hiscores"));
    assert!(surface.ops.contains(&Op::Text("Hiscores".into(), 40.0, 70.0)));
}

#[test]
fn countdown_digit_is_centered() {
    let mut h = Harness::new();
    h.click(-500.0, -500.0);
    let mut surface = RecordingSurface::loaded();
    h.session.draw(&mut surface).unwrap();

    assert!(surface.ops.contains(&Op::Text("3".into(), 591.0, 324.0)));
    assert!(!surface.texts().contains(&"Click to start"));
}

#[test]
fn colored_tiles_fill_at_board_offset() {
    let mut h = Harness::new();
    h.start_playing();
    h.pin(0, TileColor::Red);
    h.pin(1, TileColor::Uncolored);
    h.pin(2, TileColor::Bomb);
    let mut surface = RecordingSurface::loaded();
    h.session.draw(&mut surface).unwrap();

    let fills = surface.fills();
    assert_eq!(fills.len(), 2);
    assert_eq!(*fills[0], Op::FillRect("red".into(), 20.0, 20.0, 100.0, 100.0));
    assert_eq!(*fills[1], Op::FillRect("black".into(), 420.0, 20.0, 100.0, 100.0));
    assert!(!surface.texts().contains(&"Game Over"));
}

#[test]
fn game_over_shows_caption_and_ledger_rows() {
    let mut h = Harness::new();
    h.start_playing();
    h.pin(2, TileColor::Blue);
    h.pin(0, TileColor::Bomb);
    h.click(450.0, 50.0);
    h.click(50.0, 50.0);

    let mut surface = RecordingSurface::loaded();
    h.session.draw(&mut surface).unwrap();
    let texts = surface.texts();

    assert!(texts.contains(&"Game Over"));
    assert!(texts.contains(&"Score: 40"));
    assert!(surface.ops.contains(&Op::Text("1. Anonymous: 40".into(), 1192.0, 110.0)));
    assert!(surface.ops.contains(&Op::Text("2. ".into(), 1192.0, 140.0)));
    assert!(surface.ops.contains(&Op::Text("10. ".into(), 1192.0, 380.0)));
}
