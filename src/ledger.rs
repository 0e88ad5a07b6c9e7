//! High-score ledger persisted as a JSON blob in a key-value store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{LEDGER_CAPACITY, LEDGER_KEY};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("could not encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;
    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError>;
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.map.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: i64,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
    pub name: String,
}

impl HighScoreEntry {
    pub fn new(score: i64, timestamp_ms: f64, name: impl Into<String>) -> Self {
        Self {
            score,
            timestamp_ms,
            name: name.into(),
        }
    }
}

pub struct HighScoreLedger {
    store: Box<dyn KeyValueStore>,
    entries: Vec<HighScoreEntry>,
}

impl std::fmt::Debug for HighScoreLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScoreLedger")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl HighScoreLedger {
    /// Read the ledger from `store`. Missing, unreadable or corrupt data yields
    /// an empty ledger.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let entries = match store.get(LEDGER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HighScoreEntry>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("ignoring corrupt high-score data: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("high scores not loaded: {err}");
                Vec::new()
            }
        };
        let mut ledger = Self { store, entries };
        ledger.sort_and_cap();
        ledger
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert, keep the best `LEDGER_CAPACITY` entries and persist. The in-memory
    /// ledger is updated even when persisting fails.
    pub fn record(&mut self, entry: HighScoreEntry) -> Result<(), LedgerError> {
        self.entries.push(entry);
        self.sort_and_cap();
        self.persist()
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(LEDGER_KEY, &json)
    }

    // Stable: equal scores keep insertion order.
    fn sort_and_cap(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEDGER_CAPACITY);
    }
}
