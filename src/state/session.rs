//! Session screen state machine and cross-match statistics.
//!
//! Tracks which screen the player is on and validates transitions.
//!
//! # State Diagram
//!
//! ```text
//! ┌──────────┐  submit_name   ┌───────────┐  match_ended   ┌────────────┐
//! │  Input   │───────────────▶│  Playing  │───────────────▶│  Finished  │
//! └──────────┘                └───────────┘                └──────┬─────┘
//!                                   ▲                             │
//!                                   │         play_again          │
//!                                   └─────────────────────────────┘
//! ```
//!
//! `Input` is the only initial state and there is no terminal state: the
//! session loops between `Playing` and `Finished` until the hosting process
//! ends. Session statistics (games played, best score) survive play-again;
//! only match state resets.

use std::fmt;

/// Which screen the session is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Name-entry screen
    #[default]
    Input,

    /// A match is running
    Playing { player: String },

    /// Match summary with the final score
    Finished { player: String, final_score: u8 },
}

impl Screen {
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    /// The player's display name, once entered.
    pub fn player(&self) -> Option<&str> {
        match self {
            Self::Playing { player } | Self::Finished { player, .. } => Some(player),
            Self::Input => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Playing { player } => write!(f, "Playing({})", player),
            Self::Finished {
                player,
                final_score,
            } => write!(f, "Finished({}, {})", player, final_score),
        }
    }
}

/// Screen transition events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Name form submitted. The name is trimmed; empty input is rejected.
    SubmitName { name: String },
    /// The match engine reported a terminal match with this player score.
    MatchEnded { score: u8 },
    /// Play-again button on the summary screen.
    PlayAgain,
}

/// Error when a screen transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Screen,
    pub event: ScreenEvent,
    pub reason: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} via {:?}: {}",
            self.from, self.event, self.reason
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// Maximum length of a player name, as enforced by the entry form.
pub const MAX_NAME_LEN: usize = 15;

/// Cross-match session counters. Never reset by play-again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub games_played: u32,
    pub best_score: u8,
}

impl SessionStats {
    /// Record one completed match.
    pub fn record_match(&mut self, score: u8) {
        self.games_played += 1;
        self.best_score = self.best_score.max(score);
    }
}

/// Session state machine plus statistics.
#[derive(Debug, Clone, Default)]
pub struct Session {
    screen: Screen,
    stats: SessionStats,
}

impl Session {
    /// Create a new session on the name-entry screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Session counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The player's display name, once entered.
    pub fn player(&self) -> Option<&str> {
        self.screen.player()
    }

    /// Apply an event, returning the new session or an error.
    pub fn apply(&self, event: ScreenEvent) -> Result<Self, InvalidTransition> {
        let mut next = self.clone();
        next.apply_mut(event)?;
        Ok(next)
    }

    /// Apply an event in place, returning error if invalid.
    pub fn apply_mut(&mut self, event: ScreenEvent) -> Result<(), InvalidTransition> {
        self.screen = self.transition(&event)?;
        if let ScreenEvent::MatchEnded { score } = event {
            self.stats.record_match(score);
        }
        Ok(())
    }

    /// Calculate the new screen for an event.
    fn transition(&self, event: &ScreenEvent) -> Result<Screen, InvalidTransition> {
        use Screen::*;
        use ScreenEvent::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: self.screen.clone(),
            event: event.clone(),
            reason,
        };

        match (&self.screen, event) {
            // SubmitName: Input -> Playing, rejecting blank names
            (Input, SubmitName { name }) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(invalid("Name must not be empty"));
                }
                let player: String = trimmed.chars().take(MAX_NAME_LEN).collect();
                Ok(Playing { player })
            }
            (_, SubmitName { .. }) => Err(invalid("Name entry is only shown once")),

            // MatchEnded: Playing -> Finished
            (Playing { player }, MatchEnded { score }) => Ok(Finished {
                player: player.clone(),
                final_score: *score,
            }),
            (_, MatchEnded { .. }) => Err(invalid("No match is running")),

            // PlayAgain: Finished -> Playing
            (Finished { player, .. }, PlayAgain) => Ok(Playing {
                player: player.clone(),
            }),
            (_, PlayAgain) => Err(invalid("Nothing to replay")),
        }
    }

    pub fn is_on_input(&self) -> bool {
        self.screen.is_input()
    }

    pub fn is_playing(&self) -> bool {
        self.screen.is_playing()
    }

    pub fn is_finished(&self) -> bool {
        self.screen.is_finished()
    }
}
