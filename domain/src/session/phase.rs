//! Session phase state machine

use serde::{Deserialize, Serialize};

/// Coarse state of a session
///
/// `Intro → Investigation → {Won | Lost}`. `Intro` is only entered by
/// creating a new session; `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Intro,
    Investigation,
    Won,
    Lost,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Investigation => "investigation",
            Phase::Won => "won",
            Phase::Lost => "lost",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Intro => "Case Briefing",
            Phase::Investigation => "Investigation",
            Phase::Won => "Case Closed",
            Phase::Lost => "Justice Denied",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
