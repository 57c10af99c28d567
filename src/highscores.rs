//! High score persistence
//!
//! A single value under one key, stored as base-10 text. Loading never
//! fails: a missing, unreadable or unparseable value counts as 0.

use crate::persistence::KeyValueStore;

/// The persisted best score plus the store it lives in
#[derive(Debug)]
pub struct HighScore<S: KeyValueStore> {
    store: S,
    best: u64,
}

impl<S: KeyValueStore> HighScore<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    /// Read the persisted value once
    pub fn load(store: S) -> Self {
        let best = match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    best
                }
                Err(_) => {
                    log::warn!("Ignoring unparseable high score {:?}", raw);
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to read high score: {}", e);
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a score; writes through only when it beats the best.
    /// Returns true for a new high score.
    pub fn record(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.store.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use std::io;

    type Scores = HighScore<MemoryStore>;

    fn store_with(value: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(Scores::STORAGE_KEY, value).unwrap();
        store
    }

    #[test]
    fn test_missing_is_zero() {
        assert_eq!(Scores::load(MemoryStore::new()).best(), 0);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(Scores::load(store_with("lots")).best(), 0);
        assert_eq!(Scores::load(store_with("-4")).best(), 0);
        assert_eq!(Scores::load(store_with("")).best(), 0);
    }

    #[test]
    fn test_parses_stored_value() {
        assert_eq!(Scores::load(store_with("1234")).best(), 1234);
        assert_eq!(Scores::load(store_with(" 7\n")).best(), 7);
    }

    #[test]
    fn test_record_only_higher() {
        let mut scores = Scores::load(store_with("5"));
        assert!(!scores.record(5));
        assert!(!scores.record(2));
        assert!(scores.record(6));
        assert_eq!(
            scores.store().get(Scores::STORAGE_KEY).unwrap().as_deref(),
            Some("6")
        );
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::other("disk on fire"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut scores = HighScore::load(BrokenStore);
        assert_eq!(scores.best(), 0);
        assert!(scores.record(10));
        assert_eq!(scores.best(), 10);
    }
}
