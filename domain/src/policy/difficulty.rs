//! Difficulty policy: how many suspects a case is generated with.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Difficulty level of a case (Value Object)
///
/// Chosen once at case creation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Resolved configuration for a difficulty level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub level: Difficulty,
    pub suspect_count: usize,
    pub label: &'static str,
}

impl Difficulty {
    /// All levels, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Map this level to its suspect count and display label.
    pub fn config(&self) -> DifficultyConfig {
        let (suspect_count, label) = match self {
            Difficulty::Easy => (3, "Easy"),
            Difficulty::Medium => (5, "Medium"),
            Difficulty::Hard => (7, "Hard"),
        };
        DifficultyConfig {
            level: *self,
            suspect_count,
            label,
        }
    }

    pub fn suspect_count(&self) -> usize {
        self.config().suspect_count
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DomainError::UnknownDifficulty(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspect_counts() {
        assert_eq!(Difficulty::Easy.suspect_count(), 3);
        assert_eq!(Difficulty::Medium.suspect_count(), 5);
        assert_eq!(Difficulty::Hard.suspect_count(), 7);
    }

    #[test]
    fn test_config_is_total() {
        for level in Difficulty::ALL {
            let config = level.config();
            assert_eq!(config.level, level);
            assert!(config.suspect_count > 0);
            assert!(!config.label.is_empty());
        }
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(DomainError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
    }
}
