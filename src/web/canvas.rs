// Canvas-backed drawing surface with the game's two images.
use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement};

use super::{Listener, describe};
use crate::config::{LOGO_IMAGE, TABLEAU_IMAGE};
use crate::session::Viewport;
use crate::surface::{Artwork, Surface, SurfaceError};

/// Image element plus its load state. Failed loads stay unloaded.
struct ImageSlot {
    element: HtmlImageElement,
    loaded: Rc<Cell<bool>>,
    _listeners: [Listener; 2],
}

impl ImageSlot {
    fn load(src: &'static str) -> Result<Self, JsValue> {
        let element = HtmlImageElement::new()?;
        let loaded = Rc::new(Cell::new(false));
        let on_load = {
            let loaded = loaded.clone();
            Listener::new(element.as_ref(), "load", move |_| {
                log::info!("{src} loaded.");
                loaded.set(true);
            })?
        };
        let on_error = Listener::new(element.as_ref(), "error", move |_| {
            log::error!("failed to load image {src}");
        })?;
        element.set_src(src);
        Ok(Self {
            element,
            loaded,
            _listeners: [on_load, on_error],
        })
    }

    fn size(&self) -> Option<(f64, f64)> {
        self.loaded
            .get()
            .then(|| (self.element.width() as f64, self.element.height() as f64))
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    tableau: ImageSlot,
    logo: ImageSlot,
}

impl CanvasSurface {
    /// Append a canvas sized to the viewport to `container` and start loading
    /// the artwork.
    pub fn create(doc: &Document, container: &HtmlElement, viewport: Viewport) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        container.append_child(&canvas)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        let mut surface = Self {
            canvas,
            ctx,
            tableau: ImageSlot::load(TABLEAU_IMAGE)?,
            logo: ImageSlot::load(LOGO_IMAGE)?,
        };
        surface.resize(viewport);
        Ok(surface)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
        // Resizing resets context state.
        self.ctx.set_image_smoothing_enabled(true);
    }

    pub fn remove(&self) {
        self.canvas.remove();
    }

    fn slot(&self, art: Artwork) -> &ImageSlot {
        match art {
            Artwork::Tableau => &self.tableau,
            Artwork::Logo => &self.logo,
        }
    }
}

fn canvas_err(call: &'static str) -> impl Fn(JsValue) -> SurfaceError {
    move |err| SurfaceError::Canvas {
        call,
        message: describe(&err),
    }
}

impl Surface for CanvasSurface {
    fn artwork_size(&self, art: Artwork) -> Option<(f64, f64)> {
        self.slot(art).size()
    }

    fn draw_artwork(&mut self, art: Artwork, x: f64, y: f64) -> Result<(), SurfaceError> {
        let slot = self.slot(art);
        if !slot.loaded.get() {
            return Ok(());
        }
        self.ctx
            .draw_image_with_html_image_element(&slot.element, x, y)
            .map_err(canvas_err("drawImage"))
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.fill_text(text, x, y).map_err(canvas_err("fillText"))
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx
            .stroke_text(text, x, y)
            .map_err(canvas_err("strokeText"))
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .map_err(canvas_err("measureText"))
    }
}
