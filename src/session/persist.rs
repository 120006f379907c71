//! Loading and saving a session through a key-value store.
//!
//! Loading never fails: a missing or unreadable value falls back to its
//! default and is logged. Saving only fails if a value cannot be encoded.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::candidate::Candidate;
use crate::core::config::Settings;
use crate::rig::RigTable;
use crate::round::RoundCounter;
use crate::storage::{
    KeyValueStore, StorageError, OPTIONS_KEY, RIGGED_KEY, ROUND_COUNT_KEY, SETTINGS_KEY,
};
use crate::wheel::CandidateSet;

use super::Session;

impl Session {
    /// Rebuild a session from stored values.
    ///
    /// - No stored candidates (or an empty list) gives the default wheel
    /// - Settings merge over defaults field by field
    /// - Rig entries are loaded as-is; stale ones are handled at spin time
    pub fn load(store: &impl KeyValueStore, seed: u64) -> Self {
        let candidates = read::<Vec<Candidate>>(store, OPTIONS_KEY)
            .filter(|list| !list.is_empty())
            .map_or_else(CandidateSet::with_defaults, CandidateSet::from_candidates);

        let settings = read::<Settings>(store, SETTINGS_KEY).unwrap_or_default();
        let mut session = Self::with_candidates(candidates, settings, seed);

        session.counter = read::<u32>(store, ROUND_COUNT_KEY)
            .map(RoundCounter::from_completed)
            .unwrap_or_default();
        session.rig = read::<RigTable>(store, RIGGED_KEY).unwrap_or_default();
        session
    }

    /// Write every store.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(OPTIONS_KEY, serde_json::to_string(self.candidates.list())?);
        store.set(ROUND_COUNT_KEY, self.counter.completed().to_string());
        store.set(RIGGED_KEY, serde_json::to_string(&self.rig)?);
        self.save_settings(store)
    }

    /// Write only the settings record.
    pub fn save_settings(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(SETTINGS_KEY, serde_json::to_string(&self.settings)?);
        Ok(())
    }
}

fn read<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "ignoring unreadable stored value");
            None
        }
    }
}
