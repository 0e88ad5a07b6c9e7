//! Minimal drawing surface the board and session render into.

use thiserror::Error;

/// Images the game draws. The surface owns the loaded handles; an image that
/// has not finished loading (or failed to) has no size and is not drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Artwork {
    Tableau,
    Logo,
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("canvas call `{call}` failed: {message}")]
    Canvas { call: &'static str, message: String },
}

pub trait Surface {
    /// `None` until the image is loaded.
    fn artwork_size(&self, art: Artwork) -> Option<(f64, f64)>;
    fn draw_artwork(&mut self, art: Artwork, x: f64, y: f64) -> Result<(), SurfaceError>;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_font(&mut self, font: &str);
    fn set_text_baseline(&mut self, baseline: &str);

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError>;
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError>;
    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError>;
}
