// Browser-backed storage and clocks.
use web_sys::{Performance, Storage, window};

use super::describe;
use crate::ledger::{KeyValueStore, LedgerError};
use crate::session::Clock;

/// `window.localStorage`.
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    pub fn from_window() -> Result<Self, LedgerError> {
        let win = window().ok_or_else(|| LedgerError::Storage("no window".into()))?;
        let storage = win
            .local_storage()
            .map_err(|e| LedgerError::Storage(describe(&e)))?
            .ok_or_else(|| LedgerError::Storage("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        self.storage
            .get_item(key)
            .map_err(|e| LedgerError::Storage(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| LedgerError::Storage(describe(&e)))
    }
}

/// `performance.now()` for pacing, `Date.now()` for timestamps.
#[derive(Clone)]
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }

    fn epoch_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
