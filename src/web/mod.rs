//! Browser runtime: canvas, pointer hooks, the fixed-step update timer and the
//! display-rate draw loop.
//!
//! The running game lives in a thread-local slot. The update timer fires every
//! [`TICK_PERIOD_MS`] and feeds the measured time since the previous tick into
//! [`GameSession::update`]. The draw loop re-arms itself through
//! `requestAnimationFrame`; a frame that fails is logged and the loop carries on.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, window};

mod canvas;
mod music;
mod pointer;
mod storage;

pub use canvas::CanvasSurface;
pub use music::MusicPlayer;
pub use storage::{PerformanceClock, WebStorage};

use crate::audio::Playlist;
use crate::config::TICK_PERIOD_MS;
use crate::ledger::{HighScoreLedger, KeyValueStore, MemoryStore};
use crate::session::{Clock, GameSession, Viewport};

// --- Event listeners ----------------------------------------------------------

/// Event listener that detaches itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub(crate) fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

// --- Runtime ------------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self re-arming `requestAnimationFrame` loop.
struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start() -> Self {
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let handle = Rc::new(Cell::new(None));
        let h = handle.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            RUNTIME.with(|cell| {
                if let Some(rt) = cell.borrow_mut().as_mut() {
                    if let Err(err) = rt.session.draw(&mut rt.surface) {
                        log::error!("frame failed: {err}");
                    }
                }
            });
            h.set(request_frame(&f));
        }) as Box<dyn FnMut(f64)>));
        handle.set(request_frame(&g));
        Self {
            callback: g,
            handle,
        }
    }

    fn cancel(&self) {
        if let (Some(w), Some(id)) = (window(), self.handle.take()) {
            let _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself.
        self.callback.borrow_mut().take();
    }
}

fn request_frame(f: &FrameCallback) -> Option<i32> {
    let w = window()?;
    let cb = f.borrow();
    w.request_animation_frame(cb.as_ref()?.as_ref().unchecked_ref())
        .ok()
}

struct GameRuntime {
    session: GameSession,
    surface: CanvasSurface,
    container: HtmlElement,
    clock: PerformanceClock,
    last_update_ms: f64,
    interval_id: i32,
    _tick: Closure<dyn FnMut()>,
    frames: FrameLoop,
    listeners: Vec<Listener>,
    music: Option<MusicPlayer>,
}

impl GameRuntime {
    fn tick(&mut self) {
        let now = self.clock.now_ms();
        let dt = now - self.last_update_ms;
        self.last_update_ms = now;
        self.session.update(dt);
    }

    fn on_resize(&mut self) {
        let viewport = viewport_of(&self.container);
        self.surface.resize(viewport);
        self.session.resize(viewport);
    }

    fn shutdown(mut self) {
        if let Some(w) = window() {
            w.clear_interval_with_handle(self.interval_id);
        }
        self.frames.cancel();
        self.listeners.clear();
        if let Some(music) = self.music.as_mut() {
            music.stop();
        }
        self.session.uninitialize();
        self.surface.remove();
        log::info!("game stopped");
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<GameRuntime>> = const { RefCell::new(None) };
}

fn viewport_of(container: &HtmlElement) -> Viewport {
    Viewport {
        x: f64::from(container.client_left()),
        y: f64::from(container.client_top()),
        width: f64::from(container.client_width()),
        height: f64::from(container.client_height()),
    }
}

/// RNG seeded from the platform's entropy source.
pub fn seeded_rng() -> fastrand::Rng {
    let mut seed = [0u8; 8];
    match getrandom::getrandom(&mut seed) {
        Ok(()) => fastrand::Rng::with_seed(u64::from_le_bytes(seed)),
        Err(err) => {
            log::warn!("no entropy source ({err}), seeding from the clock");
            fastrand::Rng::with_seed(js_sys::Date::now() as u64)
        }
    }
}

/// Mount the game into the element with id `container_id` and start both loops.
pub fn start(container_id: &str) -> Result<(), JsValue> {
    if RUNTIME.with(|cell| cell.borrow().is_some()) {
        log::warn!("game already running");
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let container: HtmlElement = doc
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str("game container not found"))?
        .dyn_into()?;

    let viewport = viewport_of(&container);
    let surface = CanvasSurface::create(&doc, &container, viewport)?;

    let store: Box<dyn KeyValueStore> = match WebStorage::from_window() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("high scores will not persist: {err}");
            Box::new(MemoryStore::new())
        }
    };
    let clock = PerformanceClock::new();
    let mut session = GameSession::new(
        HighScoreLedger::load(store),
        Box::new(clock.clone()),
        seeded_rng(),
    );
    session.resize(viewport);

    let mut listeners = pointer::hook(&container, session.hook_input())?;
    listeners.push(Listener::new(win.as_ref(), "resize", |_| {
        RUNTIME.with(|cell| {
            if let Some(rt) = cell.borrow_mut().as_mut() {
                rt.on_resize();
            }
        });
    })?);

    let music = match MusicPlayer::preload(Playlist::default(), seeded_rng()) {
        Ok(player) => Some(player),
        Err(err) => {
            log::error!("background music unavailable: {}", describe(&err));
            None
        }
    };

    let tick = Closure::wrap(Box::new(|| {
        RUNTIME.with(|cell| {
            if let Some(rt) = cell.borrow_mut().as_mut() {
                rt.tick();
            }
        });
    }) as Box<dyn FnMut()>);
    let interval_id = win.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_PERIOD_MS,
    )?;

    let runtime = GameRuntime {
        session,
        surface,
        container,
        last_update_ms: clock.now_ms(),
        clock,
        interval_id,
        _tick: tick,
        frames: FrameLoop::start(),
        listeners,
        music,
    };
    RUNTIME.with(|cell| cell.replace(Some(runtime)));
    log::info!("game started");
    Ok(())
}

/// Cancel both loops, detach every listener and remove the canvas.
pub fn stop() {
    if let Some(runtime) = RUNTIME.with(|cell| cell.borrow_mut().take()) {
        runtime.shutdown();
    }
}
