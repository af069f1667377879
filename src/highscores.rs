//! Recent score history
//!
//! Persisted to LocalStorage as a JSON array, newest first, last 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of past scores to keep
pub const MAX_HISTORY: usize = 10;

/// Final scores of past runs, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreHistory {
    entries: Vec<u32>,
}

impl ScoreHistory {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "corgi_run_history";

    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run at the front, dropping the oldest past the cap
    pub fn append(&mut self, score: u32) {
        self.entries.insert(0, score);
        self.entries.truncate(MAX_HISTORY);
    }

    /// Scores, newest first
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    /// Highest recorded score, 0 when empty
    pub fn best(&self) -> u32 {
        self.entries.iter().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Numbered lines for the game-over list ("1. 300")
    pub fn display_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, score)| format!("{}. {}", i + 1, score))
            .collect()
    }

    /// Parse stored JSON. Anything unreadable counts as no history.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<ScoreHistory>(json) {
            Ok(mut history) => {
                history.entries.truncate(MAX_HISTORY);
                history
            }
            Err(e) => {
                log::warn!("Discarding unreadable score history: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // A Vec<u32> always serializes
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let history = Self::from_json(&json);
                log::info!("Loaded {} past scores", history.len());
                return history;
            }
        }

        log::info!("No score history found, starting fresh");
        Self::new()
    }

    /// Save history to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Score history saved ({} entries)", self.entries.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_newest_first() {
        let mut history = ScoreHistory::new();
        history.append(100);
        history.append(300);
        assert_eq!(history.entries(), &[300, 100]);
    }

    #[test]
    fn test_cap_at_ten() {
        let mut history = ScoreHistory::new();
        for score in 1..=11 {
            history.append(score * 100);
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.entries()[0], 1100);
        assert_eq!(*history.entries().last().unwrap(), 200);
    }

    #[test]
    fn test_best() {
        let mut history = ScoreHistory::new();
        assert_eq!(history.best(), 0);
        history.append(400);
        history.append(0);
        history.append(200);
        assert_eq!(history.best(), 400);
    }

    #[test]
    fn test_json_format() {
        let mut history = ScoreHistory::new();
        history.append(500);
        history.append(700);
        assert_eq!(history.to_json(), "[700,500]");
        assert_eq!(ScoreHistory::from_json("[700,500]"), history);
    }

    #[test]
    fn test_corrupt_json_is_empty() {
        assert!(ScoreHistory::from_json("not json").is_empty());
        assert!(ScoreHistory::from_json("[-5, 10]").is_empty());
        assert!(ScoreHistory::from_json("{\"a\":1}").is_empty());
    }

    #[test]
    fn test_oversized_json_truncated() {
        let json = serde_json::to_string(&(0..15).collect::<Vec<u32>>()).unwrap();
        let history = ScoreHistory::from_json(&json);
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.entries()[0], 0);
    }

    #[test]
    fn test_display_lines() {
        let mut history = ScoreHistory::new();
        history.append(100);
        history.append(900);
        assert_eq!(history.display_lines(), vec!["1. 900", "2. 100"]);
    }
}
