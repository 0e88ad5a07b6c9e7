// Background music over a single <audio> element.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use super::{Listener, describe};
use crate::audio::Playlist;

pub struct MusicPlayer {
    audio: HtmlAudioElement,
    listeners: Vec<Listener>,
}

impl MusicPlayer {
    /// Start loading the first track; playback begins once it can play through
    /// and continues with the next track whenever one ends.
    pub fn preload(playlist: Playlist, rng: fastrand::Rng) -> Result<Self, JsValue> {
        let audio = HtmlAudioElement::new()?;
        audio.set_volume(playlist.volume());
        audio.set_preload("auto");

        let queue = Rc::new(RefCell::new((playlist, rng)));
        let Some(first) = next_track(&queue) else {
            log::warn!("no background music configured");
            return Ok(Self {
                audio,
                listeners: Vec::new(),
            });
        };

        let started = Rc::new(Cell::new(false));
        let on_ready = {
            let a = audio.clone();
            Listener::new(audio.as_ref(), "canplaythrough", move |_| {
                if !started.replace(true) {
                    log::info!("Background music loaded.");
                    play(&a);
                }
            })?
        };
        let on_error = {
            let a = audio.clone();
            Listener::new(audio.as_ref(), "error", move |_| {
                log::error!("failed to load music track {}", a.src());
            })?
        };
        let on_ended = {
            let a = audio.clone();
            let queue = queue.clone();
            Listener::new(audio.as_ref(), "ended", move |_| {
                if let Some(src) = next_track(&queue) {
                    a.set_src(&src);
                    play(&a);
                }
            })?
        };

        audio.set_src(&first);
        Ok(Self {
            audio,
            listeners: vec![on_ready, on_error, on_ended],
        })
    }

    pub fn stop(&mut self) {
        self.listeners.clear();
        if let Err(err) = self.audio.pause() {
            log::warn!("could not pause music: {}", describe(&err));
        }
    }
}

fn next_track(queue: &RefCell<(Playlist, fastrand::Rng)>) -> Option<String> {
    let mut q = queue.borrow_mut();
    let (playlist, rng) = &mut *q;
    playlist.advance(rng).map(str::to_owned)
}

fn play(audio: &HtmlAudioElement) {
    if let Err(err) = audio.play() {
        log::error!("music playback failed: {}", describe(&err));
    }
}
