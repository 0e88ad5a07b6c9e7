//! Background music track cycling.

use crate::config::{MUSIC_SHUFFLE, MUSIC_TRACKS, MUSIC_VOLUME};

#[derive(Clone, Debug)]
pub struct Playlist {
    tracks: Vec<String>,
    current: Option<usize>,
    volume: f64,
    pub shuffle: bool,
}

impl Default for Playlist {
    fn default() -> Self {
        let mut playlist = Self::new(MUSIC_TRACKS.iter().map(|t| t.to_string()).collect());
        playlist.set_volume(MUSIC_VOLUME);
        playlist.shuffle = MUSIC_SHUFFLE;
        playlist
    }
}

impl Playlist {
    pub fn new(tracks: Vec<String>) -> Self {
        Self {
            tracks,
            current: None,
            volume: 1.0,
            shuffle: false,
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    }

    pub fn current(&self) -> Option<&str> {
        self.current.map(|i| self.tracks[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Move to the next track. Sequential order wraps around; shuffle never
    /// repeats the current track when there is a choice.
    pub fn advance(&mut self, rng: &mut fastrand::Rng) -> Option<&str> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        let next = match (self.shuffle, self.current) {
            (false, None) => 0,
            (false, Some(i)) => (i + 1) % len,
            (true, Some(i)) if len > 1 => {
                let pick = rng.usize(..len - 1);
                if pick >= i { pick + 1 } else { pick }
            }
            (true, _) => rng.usize(..len),
        };
        self.current = Some(next);
        self.current()
    }
}
