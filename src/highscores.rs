//! Best score for a game
//!
//! A single integer per storage key, written as plain decimal text.

use crate::persistence;

/// Storage key for the siege best score
pub const SIEGE_KEY: &str = "syntax-siege-highscore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    key: &'static str,
    best: u32,
}

impl HighScore {
    pub fn new(key: &'static str) -> Self {
        Self { key, best: 0 }
    }

    /// Read the stored value; missing or unparsable is 0
    pub fn load(key: &'static str) -> Self {
        let best = persistence::get_item(key)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(0);
        log::info!("Best score for '{key}': {best}");
        Self { key, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Raise the best if `score` beats it; true when it changed
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn save(&self) {
        if persistence::set_item(self.key, &self.best.to_string()) {
            log::info!("Best score saved ({})", self.best);
        } else {
            log::warn!("Could not store best score for '{}'", self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_raises() {
        let mut hs = HighScore::new("hs-test-record");
        assert!(hs.record(120));
        assert!(!hs.record(120));
        assert!(!hs.record(40));
        assert_eq!(hs.best(), 120);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut hs = HighScore::load("hs-test-round-trip");
        assert_eq!(hs.best(), 0);
        hs.record(370);
        hs.save();
        assert_eq!(persistence::get_item("hs-test-round-trip").as_deref(), Some("370"));
        assert_eq!(HighScore::load("hs-test-round-trip").best(), 370);
    }

    #[test]
    fn test_garbage_loads_as_zero() {
        persistence::set_item("hs-test-garbage", "lots");
        assert_eq!(HighScore::load("hs-test-garbage").best(), 0);
        assert_eq!(HighScore::load(SIEGE_KEY).key(), "syntax-siege-highscore");
    }
}
