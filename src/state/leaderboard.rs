//! Local leaderboard.
//!
//! A top-5 score table persisted through the [`Storage`] port as a JSON
//! array of `{ "name": ..., "score": ... }` objects, sorted descending by
//! score. Ties keep insertion order (stable sort). Corrupt persisted data is
//! replaced by an empty board, never surfaced as an error.

use serde::{Deserialize, Serialize};

use super::storage::{Storage, KEY_LEADERBOARD};

/// Maximum entries retained.
pub const MAX_ENTRIES: usize = 5;

/// One leaderboard row. This struct is the persisted JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Display name, tagged with the mode initial, e.g. `"Alice (C)"`
    pub name: String,
    pub score: u8,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u8) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// The top-5 score table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted board. Absent or malformed data yields an empty
    /// board; loaded data is re-sorted and re-truncated defensively.
    pub fn load<S: Storage>(storage: &S) -> Self {
        let entries = match storage.get(KEY_LEADERBOARD) {
            Some(raw) => match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Discarding corrupt persisted leaderboard: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Persist the board.
    pub fn save<S: Storage>(&self, storage: &mut S) {
        // Vec<LeaderboardEntry> -> JSON array cannot fail
        let json = serde_json::to_string(&self.entries).expect("leaderboard serializes");
        storage.set(KEY_LEADERBOARD, json);
    }

    /// Record a finished match's score. The board is re-sorted descending by
    /// score and truncated to the top 5.
    pub fn record(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.normalize();
    }

    fn normalize(&mut self) {
        // sort_by is stable: ties keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Retained entries, best first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a JSON snapshot (same shape as the persisted array).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.entries).expect("leaderboard serializes")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::storage::MemoryStorage;

    fn entry(name: &str, score: u8) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score)
    }

    #[test]
    fn test_empty_board() {
        let board = Leaderboard::new();
        assert!(board.is_empty());
        assert_eq!(board.to_json(), serde_json::json!([]));
    }

    #[test]
    fn test_record_sorts_descending() {
        let mut board = Leaderboard::new();
        board.record(entry("Alice (C)", 3));
        board.record(entry("Bob (R)", 5));
        board.record(entry("Carol (C)", 4));

        let scores: Vec<u8> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![5, 4, 3]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.record(entry("First (C)", 4));
        board.record(entry("Second (C)", 4));
        board.record(entry("Third (C)", 4));

        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["First (C)", "Second (C)", "Third (C)"]);

        // A higher score still jumps ahead of the tied block
        board.record(entry("Top (R)", 5));
        assert_eq!(board.entries()[0].name, "Top (R)");
        assert_eq!(board.entries()[1].name, "First (C)");
    }

    #[test]
    fn test_truncates_to_top_five() {
        let mut board = Leaderboard::new();
        for score in [2, 5, 1, 4, 3, 0, 5] {
            board.record(entry("P", score));
        }

        assert_eq!(board.len(), MAX_ENTRIES);
        let scores: Vec<u8> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![5, 5, 4, 3, 2]);

        // Every retained score >= every discarded score
        let min_retained = scores.iter().min().copied().unwrap();
        assert!(min_retained >= 1);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut board = Leaderboard::new();
        board.record(entry("Alice (C)", 5));
        board.record(entry("Bob (R)", 2));
        board.save(&mut storage);

        let loaded = Leaderboard::load(&storage);
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_load_absent_is_empty() {
        let storage = MemoryStorage::new();
        assert!(Leaderboard::load(&storage).is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut storage = MemoryStorage::new();

        storage.set(KEY_LEADERBOARD, "not json at all".to_string());
        assert!(Leaderboard::load(&storage).is_empty());

        storage.set(KEY_LEADERBOARD, "{\"name\": \"object not array\"}".to_string());
        assert!(Leaderboard::load(&storage).is_empty());

        storage.set(KEY_LEADERBOARD, "[{\"name\": \"no score\"}]".to_string());
        assert!(Leaderboard::load(&storage).is_empty());
    }

    #[test]
    fn test_load_normalizes_oversized_data() {
        // Hand-edited storage: unsorted and longer than the cap
        let mut storage = MemoryStorage::new();
        storage.set(
            KEY_LEADERBOARD,
            serde_json::json!([
                {"name": "A", "score": 1},
                {"name": "B", "score": 5},
                {"name": "C", "score": 2},
                {"name": "D", "score": 4},
                {"name": "E", "score": 3},
                {"name": "F", "score": 5},
            ])
            .to_string(),
        );

        let board = Leaderboard::load(&storage);
        assert_eq!(board.len(), MAX_ENTRIES);
        let scores: Vec<u8> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![5, 5, 4, 3, 2]);
        // Stable: B was inserted before F
        assert_eq!(board.entries()[0].name, "B");
        assert_eq!(board.entries()[1].name, "F");
    }

    #[test]
    fn test_persisted_shape() {
        let mut storage = MemoryStorage::new();
        let mut board = Leaderboard::new();
        board.record(entry("Alice (C)", 5));
        board.save(&mut storage);

        let raw = storage.get(KEY_LEADERBOARD).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!([{"name": "Alice (C)", "score": 5}]));
    }
}
