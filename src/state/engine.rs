//! Match engine.
//!
//! Owns round resolution and match-level score/history for one active match
//! under a chosen [`RuleSet`]. A round moves through a three-phase reveal
//! sequence so the UI can stage the computer's "thinking" pause:
//!
//! ```text
//! AwaitingChoice ──submit──▶ Thinking ──reveal──▶ Revealed ──resolve──▶ AwaitingChoice
//!       ▲                    (draw made,          (outcome               (score applied,
//!       │                     hidden)              computed)              input unlocked)
//!       │                                                                      │
//!       └────────────────────────── score < 5 ◀───────────────────────────────┘
//!                                                                              │
//!                                                                  score == 5  ▼
//!                                                                            Over
//! ```
//!
//! At most one round is in flight at a time; submissions while a round is
//! pending are rejected. The engine never sleeps — the delay constants below
//! tell callers how long to wait between phases.

use std::time::Duration;

use rand::Rng;

use super::rules::{Choice, RuleSet};

/// First score to reach this wins the match.
pub const WINNING_SCORE: u8 = 5;

/// How many recent rounds the history feed shows. Full history is retained.
pub const HISTORY_DISPLAY_LIMIT: usize = 6;

/// Pause between submitting a choice and revealing the computer's draw.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(650);

/// Pause between the reveal and applying the outcome.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(260);

/// Pause between the final round and leaving the match screen.
pub const DEFAULT_MATCH_END_DELAY: Duration = Duration::from_millis(1500);

/// Delays for the staged round reveal. Callers own the actual timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    /// Submit -> reveal
    pub thinking: Duration,
    /// Reveal -> resolve
    pub settle: Duration,
    /// Match over -> screen transition
    pub match_end: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            thinking: DEFAULT_THINKING_DELAY,
            settle: DEFAULT_SETTLE_DELAY,
            match_end: DEFAULT_MATCH_END_DELAY,
        }
    }
}

/// Who won a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Player,
    Computer,
    Draw,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Computer => "computer",
            Self::Draw => "draw",
        }
    }
}

/// An immutable record of one resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// 1-based round number
    pub number: u32,
    pub player: Choice,
    pub computer: Choice,
    pub outcome: Outcome,
}

impl Round {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "round": self.number,
            "player": self.player.as_str(),
            "computer": self.computer.as_str(),
            "winner": self.outcome.as_str()
        })
    }
}

/// Where the match is in the per-round reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// Input unlocked, waiting for the player
    #[default]
    AwaitingChoice,
    /// Choice submitted; computer's draw made but not yet shown
    Thinking { player: Choice, computer: Choice },
    /// Computer's draw shown, outcome known but not yet applied
    Revealed {
        player: Choice,
        computer: Choice,
        outcome: Outcome,
    },
    /// A score reached the winning threshold
    Over,
}

impl MatchPhase {
    /// Check whether a round is between submission and resolution.
    pub fn is_round_in_flight(&self) -> bool {
        matches!(self, Self::Thinking { .. } | Self::Revealed { .. })
    }

    /// Check whether the match is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Over)
    }
}

/// Match errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Choice is not in the active rule set's domain
    InvalidChoice(Choice),
    /// A round is already between submission and resolution
    RoundInFlight,
    /// `reveal`/`resolve` called with no round in flight
    NoRoundInFlight,
    /// The match already reached the winning score
    MatchOver,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChoice(choice) => {
                write!(f, "{} is not playable under the active rule set", choice)
            }
            Self::RoundInFlight => write!(f, "A round is already in progress"),
            Self::NoRoundInFlight => write!(f, "No round is in progress"),
            Self::MatchOver => write!(f, "Match is already over"),
        }
    }
}

impl std::error::Error for MatchError {}

/// One active match: rule set, scores, round history, reveal phase.
#[derive(Debug, Clone)]
pub struct Match {
    rules: RuleSet,
    player_score: u8,
    computer_score: u8,
    history: Vec<Round>,
    phase: MatchPhase,

    /// When the match was created
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// When a score reached the winning threshold
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Match {
    /// Start a fresh match: 0-0, empty history, input unlocked.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            player_score: 0,
            computer_score: 0,
            history: Vec::new(),
            phase: MatchPhase::AwaitingChoice,
            started_at: chrono::Utc::now(),
            ended_at: None,
        }
    }

    /// The rule set this match is played under.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Current `(player, computer)` scores.
    pub fn scores(&self) -> (u8, u8) {
        (self.player_score, self.computer_score)
    }

    /// Current reveal phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Check if the match is terminal.
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Check if a round is between submission and resolution.
    pub fn is_round_in_flight(&self) -> bool {
        self.phase.is_round_in_flight()
    }

    /// The winning side, once a score has reached the threshold.
    pub fn winner(&self) -> Option<Outcome> {
        if self.player_score >= WINNING_SCORE {
            Some(Outcome::Player)
        } else if self.computer_score >= WINNING_SCORE {
            Some(Outcome::Computer)
        } else {
            None
        }
    }

    /// 1-based number of the round being played (resolved rounds + 1).
    pub fn round_number(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    /// All resolved rounds, oldest first.
    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// Recent rounds for the history feed: most-recent-first, capped.
    pub fn recent_rounds(&self) -> Vec<&Round> {
        self.history.iter().rev().take(HISTORY_DISPLAY_LIMIT).collect()
    }

    /// Submit the player's choice, drawing the computer's uniformly at
    /// random from the active choice set.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        player: Choice,
        rng: &mut R,
    ) -> Result<(), MatchError> {
        // Validate before burning a draw
        self.check_submittable(player)?;
        let computer = self.rules.choices()[rng.gen_range(0..self.rules.choice_count())];
        self.submit_against(player, computer)
    }

    /// Submit the player's choice against a known computer choice.
    ///
    /// This is the deterministic core: given both choices, the rest of the
    /// round is a pure function. Also the entry point for replays and tests.
    pub fn submit_against(&mut self, player: Choice, computer: Choice) -> Result<(), MatchError> {
        self.check_submittable(player)?;
        if !self.rules.contains(computer) {
            return Err(MatchError::InvalidChoice(computer));
        }

        self.phase = MatchPhase::Thinking { player, computer };
        Ok(())
    }

    fn check_submittable(&self, player: Choice) -> Result<(), MatchError> {
        match self.phase {
            MatchPhase::Over => return Err(MatchError::MatchOver),
            MatchPhase::Thinking { .. } | MatchPhase::Revealed { .. } => {
                return Err(MatchError::RoundInFlight)
            }
            MatchPhase::AwaitingChoice => {}
        }
        if !self.rules.contains(player) {
            return Err(MatchError::InvalidChoice(player));
        }
        Ok(())
    }

    /// Reveal the computer's draw and determine the outcome, without
    /// applying it yet.
    pub fn reveal(&mut self) -> Result<(Choice, Outcome), MatchError> {
        let (player, computer) = match self.phase {
            MatchPhase::Thinking { player, computer } => (player, computer),
            MatchPhase::Over => return Err(MatchError::MatchOver),
            _ => return Err(MatchError::NoRoundInFlight),
        };

        let outcome = if player == computer {
            Outcome::Draw
        } else if self.rules.beats(player, computer) {
            Outcome::Player
        } else {
            Outcome::Computer
        };

        self.phase = MatchPhase::Revealed {
            player,
            computer,
            outcome,
        };
        Ok((computer, outcome))
    }

    /// Apply the revealed outcome: bump the winner's score, append the round
    /// to history, and unlock input or end the match.
    pub fn resolve(&mut self) -> Result<&Round, MatchError> {
        let (player, computer, outcome) = match self.phase {
            MatchPhase::Revealed {
                player,
                computer,
                outcome,
            } => (player, computer, outcome),
            MatchPhase::Over => return Err(MatchError::MatchOver),
            _ => return Err(MatchError::NoRoundInFlight),
        };

        match outcome {
            Outcome::Player => self.player_score += 1,
            Outcome::Computer => self.computer_score += 1,
            Outcome::Draw => {}
        }

        let round = Round {
            number: self.history.len() as u32 + 1,
            player,
            computer,
            outcome,
        };
        self.history.push(round);

        if self.player_score >= WINNING_SCORE || self.computer_score >= WINNING_SCORE {
            self.phase = MatchPhase::Over;
            self.ended_at = Some(chrono::Utc::now());
            log::debug!(
                "Match over after round {}: {}-{}",
                self.history.len(),
                self.player_score,
                self.computer_score
            );
        } else {
            self.phase = MatchPhase::AwaitingChoice;
        }

        Ok(self.history.last().expect("round was just pushed"))
    }

    /// Run the full submit -> reveal -> resolve sequence in one call, for
    /// callers that don't stage the reveal.
    pub fn play_round<R: Rng + ?Sized>(
        &mut self,
        player: Choice,
        rng: &mut R,
    ) -> Result<&Round, MatchError> {
        self.submit(player, rng)?;
        self.reveal()?;
        self.resolve()
    }

    /// Play one round against a known computer choice.
    pub fn play_against(&mut self, player: Choice, computer: Choice) -> Result<&Round, MatchError> {
        self.submit_against(player, computer)?;
        self.reveal()?;
        self.resolve()
    }

    /// Convert the match state to a JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        let recent: Vec<serde_json::Value> =
            self.recent_rounds().iter().map(|r| r.to_json()).collect();

        serde_json::json!({
            "mode": self.rules.mode().as_str(),
            "player_score": self.player_score,
            "computer_score": self.computer_score,
            "winning_score": WINNING_SCORE,
            "round": self.round_number(),
            "is_over": self.is_over(),
            "round_in_flight": self.is_round_in_flight(),
            "recent_rounds": recent
        })
    }
}
