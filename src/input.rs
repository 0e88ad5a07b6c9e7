//! Double-buffered pointer sampling.
//!
//! Raw pointer events arrive whenever the browser delivers them and only write a
//! small pending cache through a [`PointerSink`]. The simulation calls
//! [`InputSampler::sample`] once per tick, which turns that cache into an
//! immutable [`InputSnapshot`] and keeps the previous one around so clicks can
//! be detected as rising edges.

use std::cell::RefCell;
use std::rc::Rc;

/// Button bitmask as reported by `MouseEvent.buttons`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonMask(u16);

impl ButtonMask {
    pub const LEFT: u16 = 1;
    pub const RIGHT: u16 = 2;
    pub const MIDDLE: u16 = 4;

    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    /// Prefer the modern `buttons` field; fall back to the legacy `which`, then
    /// `button`, when it is not available.
    pub fn from_event_fields(buttons: Option<u16>, which: u32, button: i16) -> Self {
        match buttons {
            Some(bits) => Self(bits),
            None if which != 0 => Self(which as u16),
            None => Self(button.max(0) as u16),
        }
    }

    pub fn left(self) -> bool {
        self.0 & Self::LEFT == Self::LEFT
    }

    pub fn right(self) -> bool {
        self.0 & Self::RIGHT == Self::RIGHT
    }

    pub fn middle(self) -> bool {
        self.0 & Self::MIDDLE == Self::MIDDLE
    }
}

/// Pointer state as seen by one simulation tick, in board-local coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub x: f64,
    pub y: f64,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

/// Last-known raw pointer state, written by event callbacks.
#[derive(Debug)]
struct PendingPointer {
    hooked: bool,
    x: f64,
    y: f64,
    buttons: ButtonMask,
}

impl Default for PendingPointer {
    fn default() -> Self {
        Self {
            hooked: false,
            x: -1.0,
            y: -1.0,
            buttons: ButtonMask::default(),
        }
    }
}

/// Write end handed to pointer event callbacks. Writes are dropped once the
/// sampler has been unhooked.
#[derive(Clone, Debug)]
pub struct PointerSink {
    pending: Rc<RefCell<PendingPointer>>,
}

impl PointerSink {
    /// Record a position relative to the game container.
    pub fn move_to(&self, x: f64, y: f64) {
        let mut p = self.pending.borrow_mut();
        if p.hooked {
            p.x = x;
            p.y = y;
        }
    }

    /// Record the full button state after a press or release.
    pub fn set_buttons(&self, buttons: ButtonMask) {
        let mut p = self.pending.borrow_mut();
        if p.hooked {
            p.buttons = buttons;
        }
    }

    pub fn is_hooked(&self) -> bool {
        self.pending.borrow().hooked
    }
}

#[derive(Debug, Default)]
pub struct InputSampler {
    pending: Rc<RefCell<PendingPointer>>,
    previous: InputSnapshot,
    current: InputSnapshot,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to a pointer source. Re-hooking resets the pending cache and
    /// detaches sinks handed out earlier.
    pub fn hook(&mut self) -> PointerSink {
        self.pending.borrow_mut().hooked = false;
        self.pending = Rc::new(RefCell::new(PendingPointer {
            hooked: true,
            ..PendingPointer::default()
        }));
        PointerSink {
            pending: Rc::clone(&self.pending),
        }
    }

    pub fn unhook(&mut self) {
        self.pending.borrow_mut().hooked = false;
    }

    pub fn is_hooked(&self) -> bool {
        self.pending.borrow().hooked
    }

    /// Shift `current` into `previous` and take a new snapshot of the pending
    /// cache. `offset` is the board's screen offset at the time of the sample.
    pub fn sample(&mut self, offset: (f64, f64)) {
        let p = self.pending.borrow();
        self.previous = self.current;
        self.current = InputSnapshot {
            x: p.x - offset.0,
            y: p.y - offset.1,
            left: p.buttons.left(),
            middle: p.buttons.middle(),
            right: p.buttons.right(),
        };
    }

    pub fn current_state(&self) -> InputSnapshot {
        self.current
    }

    pub fn previous_state(&self) -> InputSnapshot {
        self.previous
    }

    /// Left button went down between the previous and the current sample.
    pub fn clicked(&self) -> bool {
        self.current.left && !self.previous.left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_default_to_origin_with_buttons_up() {
        let sampler = InputSampler::new();
        assert_eq!(sampler.current_state(), InputSnapshot::default());
        assert_eq!(sampler.previous_state(), InputSnapshot::default());
        assert!(!sampler.clicked());
    }

    #[test]
    fn chorded_buttons_are_tested_independently() {
        let mask = ButtonMask::new(ButtonMask::LEFT | ButtonMask::RIGHT);
        assert!(mask.left());
        assert!(mask.right());
        assert!(!mask.middle());
    }

    #[test]
    fn legacy_fields_are_used_without_buttons() {
        assert!(ButtonMask::from_event_fields(None, 1, 0).left());
        assert!(ButtonMask::from_event_fields(None, 0, 4).middle());
        assert!(!ButtonMask::from_event_fields(Some(0), 1, 1).left());
    }

    #[test]
    fn events_between_samples_collapse_to_last_write() {
        let mut sampler = InputSampler::new();
        let sink = sampler.hook();
        sink.move_to(10.0, 10.0);
        sink.set_buttons(ButtonMask::new(ButtonMask::LEFT));
        sink.set_buttons(ButtonMask::new(0));
        sink.set_buttons(ButtonMask::new(ButtonMask::LEFT));
        sink.move_to(50.0, 70.0);
        sampler.sample((20.0, 20.0));

        let cur = sampler.current_state();
        assert_eq!((cur.x, cur.y), (30.0, 50.0));
        assert!(sampler.clicked());

        // Held button does not click again on the next tick.
        sampler.sample((20.0, 20.0));
        assert!(!sampler.clicked());
    }

    #[test]
    fn offset_is_read_at_sample_time() {
        let mut sampler = InputSampler::new();
        let sink = sampler.hook();
        sink.move_to(100.0, 100.0);
        sampler.sample((0.0, 0.0));
        sampler.sample((40.0, 10.0));
        assert_eq!(sampler.previous_state().x, 100.0);
        assert_eq!(sampler.current_state().x, 60.0);
        assert_eq!(sampler.current_state().y, 90.0);
    }

    #[test]
    fn unhooked_sink_is_ignored() {
        let mut sampler = InputSampler::new();
        let sink = sampler.hook();
        sink.move_to(5.0, 5.0);
        sampler.unhook();
        sink.move_to(500.0, 500.0);
        sink.set_buttons(ButtonMask::new(ButtonMask::LEFT));
        sampler.sample((0.0, 0.0));
        assert!(!sink.is_hooked());
        assert_eq!(sampler.current_state().x, 5.0);
        assert!(!sampler.current_state().left);
    }

    #[test]
    fn rehook_detaches_previous_sink() {
        let mut sampler = InputSampler::new();
        let old = sampler.hook();
        let new = sampler.hook();
        old.set_buttons(ButtonMask::new(ButtonMask::LEFT));
        new.move_to(1.0, 2.0);
        sampler.sample((0.0, 0.0));
        assert!(!sampler.current_state().left);
        assert_eq!(sampler.current_state().y, 2.0);
    }
}
