//! RPS Arena State Library
//!
//! This crate provides state management for RPS Arena game logic.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Rule Sets** - Classic rock/paper/scissors and the extended
//!   lizard/Spock variant, with a validated defeat table.
//!
//! - **Match Engine** - Per-match scores, round history, and a staged
//!   submit/reveal/resolve sequence with one round in flight at a time.
//!
//! - **Session Orchestration** - Screen state machine (name entry, match,
//!   summary) and cross-match statistics.
//!
//! - **Leaderboard & Settings** - A persisted top-5 score table, theme and
//!   mode settings, all behind an injectable key-value storage port.
//!
//! # Design Principles
//!
//! 1. **State machines validate transitions** - Invalid state changes are
//!    rejected at runtime with clear errors, never silently coerced.
//!
//! 2. **Randomness at the edge** - The computer's draw is injected via
//!    `rand::Rng`; given both choices, round resolution is pure.
//!
//! 3. **No rendering, no timers** - The crate models the reveal pacing as
//!    data; the hosting UI owns animation and wall-clock delays.
//!
//! 4. **Storage is a port** - Persisted state goes through a trait, so
//!    everything is testable against an in-memory backend.
//!
//! # Example
//!
//! ```rust
//! use rps_arena_state::state::{AppState, Choice, MemoryStorage, Outcome};
//!
//! let mut app = AppState::new(MemoryStorage::new());
//!
//! // Enter a name to start a match
//! app.submit_name("Alice").unwrap();
//!
//! // Stage a round: submit, reveal after the thinking pause, then resolve
//! app.submit_against(Choice::Rock, Choice::Scissors).unwrap();
//! let (_computer, outcome) = app.reveal().unwrap();
//! assert_eq!(outcome, Outcome::Player);
//!
//! let round = app.resolve_round().unwrap();
//! assert_eq!(round.number, 1);
//! assert_eq!(app.current_match().unwrap().scores(), (1, 0));
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
