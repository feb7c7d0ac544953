//! Game configuration from TOML (`[game]` section)

use noire_application::GameRules;
use noire_domain::{DEFAULT_QUESTION_LIMIT, Difficulty};
use serde::{Deserialize, Serialize};

/// Raw game configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Difficulty used when none is given on the command line
    pub default_difficulty: Difficulty,
    /// Questions the player may put to each suspect
    pub question_limit: usize,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::default(),
            question_limit: DEFAULT_QUESTION_LIMIT,
        }
    }
}

impl FileGameConfig {
    /// Convert to the rules the session controller enforces.
    pub fn to_game_rules(&self) -> GameRules {
        GameRules::default()
            .with_question_limit(self.question_limit)
            .with_default_difficulty(self.default_difficulty)
    }
}
