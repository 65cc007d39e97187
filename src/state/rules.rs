//! Game modes, choices, and the defeat table.
//!
//! A [`RuleSet`] is built once from a [`Mode`] and is immutable afterwards.
//! The classic mode plays rock/paper/scissors; the extended mode adds lizard
//! and Spock with the usual crossed defeat pairs.

use std::fmt;

/// Game mode selecting which rule set is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Rock, paper, scissors
    #[default]
    Classic,
    /// Rock, paper, scissors, lizard, Spock
    Rpsls,
}

impl Mode {
    /// Persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Rpsls => "rpsls",
        }
    }

    /// Parse a persisted value, falling back to the default on unknown input.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "classic" => Self::Classic,
            "rpsls" => Self::Rpsls,
            _ => Self::default(),
        }
    }

    /// Human-readable mode name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Rpsls => "RPSLS",
        }
    }

    /// First letter of the display name, used to tag leaderboard entries.
    pub fn initial(&self) -> char {
        match self {
            Self::Classic => 'C',
            Self::Rpsls => 'R',
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A throwable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

/// All choices, in display order. The classic set is the first three.
static ALL_CHOICES: [Choice; 5] = [
    Choice::Rock,
    Choice::Paper,
    Choice::Scissors,
    Choice::Lizard,
    Choice::Spock,
];

impl Choice {
    /// Stable string key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
            Self::Lizard => "lizard",
            Self::Spock => "spock",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Paper => "Paper",
            Self::Scissors => "Scissors",
            Self::Lizard => "Lizard",
            Self::Spock => "Spock",
        }
    }

    /// Parse a string key. Unknown keys are rejected, never coerced.
    pub fn parse(key: &str) -> Option<Self> {
        ALL_CHOICES.iter().copied().find(|c| c.as_str() == key)
    }

    /// The choices this one defeats (independent of mode; the rule set
    /// restricts which opponents can actually occur).
    fn defeats(&self) -> &'static [Choice] {
        match self {
            Self::Rock => &[Choice::Scissors, Choice::Lizard],
            Self::Paper => &[Choice::Rock, Choice::Spock],
            Self::Scissors => &[Choice::Paper, Choice::Lizard],
            Self::Lizard => &[Choice::Spock, Choice::Paper],
            Self::Spock => &[Choice::Scissors, Choice::Rock],
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The active rule set: which choices are playable and who beats whom.
///
/// Constructed once at match start and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    mode: Mode,
    choices: &'static [Choice],
}

impl RuleSet {
    /// Build the rule set for a mode.
    pub fn new(mode: Mode) -> Self {
        let choices: &'static [Choice] = match mode {
            Mode::Classic => &ALL_CHOICES[..3],
            Mode::Rpsls => &ALL_CHOICES[..],
        };
        Self { mode, choices }
    }

    /// The mode this rule set was built for.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Playable choices, in display order.
    pub fn choices(&self) -> &[Choice] {
        self.choices
    }

    /// Number of playable choices.
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    /// Check whether a choice is playable under this rule set.
    pub fn contains(&self, choice: Choice) -> bool {
        self.choices.contains(&choice)
    }

    /// Check whether `a` defeats `b`. Equal choices never defeat each other.
    pub fn beats(&self, a: Choice, b: Choice) -> bool {
        a.defeats().contains(&b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strings() {
        assert_eq!(Mode::Classic.as_str(), "classic");
        assert_eq!(Mode::Rpsls.as_str(), "rpsls");
        assert_eq!(Mode::parse_or_default("rpsls"), Mode::Rpsls);
        assert_eq!(Mode::parse_or_default("classic"), Mode::Classic);

        // Unknown input falls back to the default
        assert_eq!(Mode::parse_or_default("turbo"), Mode::Classic);
        assert_eq!(Mode::parse_or_default(""), Mode::Classic);
    }

    #[test]
    fn test_mode_initial() {
        assert_eq!(Mode::Classic.initial(), 'C');
        assert_eq!(Mode::Rpsls.initial(), 'R');
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("rock"), Some(Choice::Rock));
        assert_eq!(Choice::parse("spock"), Some(Choice::Spock));
        assert_eq!(Choice::parse("Rock"), None); // Keys are exact
        assert_eq!(Choice::parse("well"), None);
    }

    #[test]
    fn test_rule_set_domains() {
        let classic = RuleSet::new(Mode::Classic);
        assert_eq!(classic.choice_count(), 3);
        assert!(classic.contains(Choice::Rock));
        assert!(!classic.contains(Choice::Lizard));
        assert!(!classic.contains(Choice::Spock));

        let rpsls = RuleSet::new(Mode::Rpsls);
        assert_eq!(rpsls.choice_count(), 5);
        assert!(rpsls.contains(Choice::Lizard));
        assert!(rpsls.contains(Choice::Spock));
    }

    #[test]
    fn test_classic_table() {
        let rules = RuleSet::new(Mode::Classic);
        assert!(rules.beats(Choice::Rock, Choice::Scissors));
        assert!(rules.beats(Choice::Paper, Choice::Rock));
        assert!(rules.beats(Choice::Scissors, Choice::Paper));

        assert!(!rules.beats(Choice::Scissors, Choice::Rock));
        assert!(!rules.beats(Choice::Rock, Choice::Rock));
    }

    #[test]
    fn test_extended_table() {
        let rules = RuleSet::new(Mode::Rpsls);

        // Lizard poisons Spock, so spock vs lizard loses
        assert!(rules.beats(Choice::Lizard, Choice::Spock));
        assert!(!rules.beats(Choice::Spock, Choice::Lizard));

        assert!(rules.beats(Choice::Rock, Choice::Lizard));
        assert!(rules.beats(Choice::Paper, Choice::Spock));
        assert!(rules.beats(Choice::Scissors, Choice::Lizard));
        assert!(rules.beats(Choice::Lizard, Choice::Paper));
        assert!(rules.beats(Choice::Spock, Choice::Scissors));
        assert!(rules.beats(Choice::Spock, Choice::Rock));
    }

    #[test]
    fn test_exactly_one_winner_per_pair() {
        // For every ordered pair of distinct in-set choices, exactly one
        // direction wins; equal choices draw.
        for mode in [Mode::Classic, Mode::Rpsls] {
            let rules = RuleSet::new(mode);
            for &a in rules.choices() {
                for &b in rules.choices() {
                    let forward = rules.beats(a, b);
                    let backward = rules.beats(b, a);
                    if a == b {
                        assert!(!forward && !backward, "{a} vs {b} must draw");
                    } else {
                        assert!(
                            forward ^ backward,
                            "{a} vs {b} must have exactly one winner ({mode})"
                        );
                    }
                }
            }
        }
    }
}
