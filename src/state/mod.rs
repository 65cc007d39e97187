//! State management module for RPS Arena.
//!
//! This module provides the core state types:
//!
//! - `rules` - Modes, choices, and the defeat table
//! - `engine` - Match engine (round resolution, scores, history)
//! - `session` - Screen state machine and session statistics
//! - `leaderboard` - Persisted top-5 score table
//! - `storage` - Key-value persistence port and settings
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         AppState<S>                              │
//! │                                                                  │
//! │  ┌────────────┐   ┌──────────────┐   ┌─────────────────┐        │
//! │  │  Settings  │   │   Session    │   │   Leaderboard   │        │
//! │  │            │   │              │   │                 │        │
//! │  │ theme      │   │ Input →      │   │ top 5, sorted   │        │
//! │  │ mode       │   │   Playing →  │   │ desc by score   │        │
//! │  │            │   │   Finished ⟲ │   │                 │        │
//! │  └─────┬──────┘   └──────┬───────┘   └────────┬────────┘        │
//! │        │                 │                    │                 │
//! │        │          ┌──────▼───────┐            │                 │
//! │        │          │ Option<Match>│            │                 │
//! │        │          │              │            │                 │
//! │        │          │ scores       │            │                 │
//! │        │          │ history      │            │                 │
//! │        │          │ reveal phase │            │                 │
//! │        │          └──────────────┘            │                 │
//! │        │                                      │                 │
//! │  ┌─────▼──────────────────────────────────────▼──────┐          │
//! │  │            S: Storage (key-value port)            │          │
//! │  └───────────────────────────────────────────────────┘          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way per round: a player choice goes in, the engine draws
//! the computer's choice and stages the reveal, and once the match reaches
//! the winning score the session records the result and the leaderboard is
//! persisted.

pub mod engine;
pub mod leaderboard;
pub mod rules;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use engine::{
    Match, MatchError, MatchPhase, Outcome, RevealTiming, Round, DEFAULT_MATCH_END_DELAY,
    DEFAULT_SETTLE_DELAY, DEFAULT_THINKING_DELAY, HISTORY_DISPLAY_LIMIT, WINNING_SCORE,
};
pub use leaderboard::{Leaderboard, LeaderboardEntry, MAX_ENTRIES};
pub use rules::{Choice, Mode, RuleSet};
pub use session::{
    InvalidTransition, Screen, ScreenEvent, Session, SessionStats, MAX_NAME_LEN,
};
pub use storage::{
    MemoryStorage, Settings, Storage, Theme, KEY_GAME_MODE, KEY_LEADERBOARD, KEY_THEME,
};

use rand::Rng;

/// Application errors surfaced by [`AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Match engine rejected the action
    Match(MatchError),
    /// Screen state machine rejected the action
    Screen(InvalidTransition),
    /// A match action arrived with no match running
    NoActiveMatch,
    /// `finish_match` called before the match reached the winning score
    MatchNotOver,
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match(e) => write!(f, "{}", e),
            Self::Screen(e) => write!(f, "{}", e),
            Self::NoActiveMatch => write!(f, "No match is running"),
            Self::MatchNotOver => write!(f, "Match has not reached the winning score"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Match(e) => Some(e),
            Self::Screen(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        Self::Match(e)
    }
}

impl From<InvalidTransition> for AppError {
    fn from(e: InvalidTransition) -> Self {
        Self::Screen(e)
    }
}

/// Combined application state.
///
/// Owns the settings, the session screen machine, the leaderboard, and the
/// active match, wired to an injected [`Storage`] backend. This is the
/// orchestrator the hosting UI drives; the individual types can also be
/// used directly.
#[derive(Debug)]
pub struct AppState<S: Storage> {
    storage: S,
    settings: Settings,
    session: Session,
    leaderboard: Leaderboard,
    current_match: Option<Match>,
    timing: RevealTiming,
}

impl<S: Storage> AppState<S> {
    /// Start a session: load persisted settings and leaderboard.
    pub fn new(storage: S) -> Self {
        let settings = Settings::load(&storage);
        let leaderboard = Leaderboard::load(&storage);
        Self {
            storage,
            settings,
            session: Session::new(),
            leaderboard,
            current_match: None,
            timing: RevealTiming::default(),
        }
    }

    /// Current settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Session screen machine and statistics.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The persisted top-5 board.
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// The running match, if any.
    pub fn current_match(&self) -> Option<&Match> {
        self.current_match.as_ref()
    }

    /// Reveal pacing the UI should apply between phases.
    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    /// Override the reveal pacing.
    pub fn set_timing(&mut self, timing: RevealTiming) {
        self.timing = timing;
    }

    /// Submit the name form: `Input -> Playing`, and start a match under
    /// the currently selected mode. Blank names are rejected and the
    /// session stays on the entry screen.
    pub fn submit_name(&mut self, name: &str) -> Result<(), AppError> {
        self.session.apply_mut(ScreenEvent::SubmitName {
            name: name.to_string(),
        })?;
        self.start_match();
        Ok(())
    }

    /// Play-again on the summary screen: `Finished -> Playing` with a fresh
    /// match. Session counters are not reset.
    pub fn play_again(&mut self) -> Result<(), AppError> {
        self.session.apply_mut(ScreenEvent::PlayAgain)?;
        self.start_match();
        Ok(())
    }

    fn start_match(&mut self) {
        let rules = RuleSet::new(self.settings.mode);
        log::debug!(
            "Starting match for {} in {} mode",
            self.session.player().unwrap_or("?"),
            rules.mode()
        );
        self.current_match = Some(Match::new(rules));
    }

    fn active_match(&mut self) -> Result<&mut Match, AppError> {
        self.current_match.as_mut().ok_or(AppError::NoActiveMatch)
    }

    /// Submit the player's choice; the computer's is drawn uniformly from
    /// the active choice set.
    pub fn submit_choice<R: Rng + ?Sized>(
        &mut self,
        choice: Choice,
        rng: &mut R,
    ) -> Result<(), AppError> {
        Ok(self.active_match()?.submit(choice, rng)?)
    }

    /// Submit the player's choice against a known computer choice.
    pub fn submit_against(&mut self, player: Choice, computer: Choice) -> Result<(), AppError> {
        Ok(self.active_match()?.submit_against(player, computer)?)
    }

    /// Reveal the computer's draw after the thinking pause.
    pub fn reveal(&mut self) -> Result<(Choice, Outcome), AppError> {
        Ok(self.active_match()?.reveal()?)
    }

    /// Apply the revealed outcome after the settle pause.
    pub fn resolve_round(&mut self) -> Result<Round, AppError> {
        Ok(self.active_match()?.resolve()?.clone())
    }

    /// Run a whole round in one call (no staged reveal).
    pub fn play_round<R: Rng + ?Sized>(
        &mut self,
        choice: Choice,
        rng: &mut R,
    ) -> Result<Round, AppError> {
        Ok(self.active_match()?.play_round(choice, rng)?.clone())
    }

    /// Run a whole round against a known computer choice.
    pub fn play_against(&mut self, player: Choice, computer: Choice) -> Result<Round, AppError> {
        Ok(self.active_match()?.play_against(player, computer)?.clone())
    }

    /// Close out a terminal match: record session stats, push the tagged
    /// score onto the leaderboard, persist it, and move to the summary
    /// screen. Returns the final player score.
    pub fn finish_match(&mut self) -> Result<u8, AppError> {
        let m = self.current_match.as_ref().ok_or(AppError::NoActiveMatch)?;
        if !m.is_over() {
            return Err(AppError::MatchNotOver);
        }
        let score = m.scores().0;
        let mode = m.rules().mode();

        self.session.apply_mut(ScreenEvent::MatchEnded { score })?;

        let name = self.session.player().unwrap_or("Player");
        self.leaderboard
            .record(LeaderboardEntry::new(format!("{} ({})", name, mode.initial()), score));
        self.leaderboard.save(&mut self.storage);

        log::debug!("Recorded match for {}: final score {}", name, score);
        self.current_match = None;
        Ok(score)
    }

    /// Set and persist the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.set_theme(theme, &mut self.storage);
    }

    /// Flip and persist the theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.toggle_theme(&mut self.storage)
    }

    /// Set and persist the game mode. The active match, if any, keeps the
    /// rule set it started with; the new mode applies from the next match.
    pub fn set_mode(&mut self, mode: Mode) {
        self.settings.set_mode(mode, &mut self.storage);
    }
}
