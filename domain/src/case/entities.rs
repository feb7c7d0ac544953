//! Case domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A generated character, one of whom is secretly the killer (Entity)
///
/// Immutable for the lifetime of a session. The controller only ever reads
/// `is_killer`; it is set by the content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suspect {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub occupation: String,
    pub description: String,
    pub backstory: String,
    pub alibi: String,
    /// Names of other suspects this one knows
    #[serde(default)]
    pub connections: Vec<String>,
    #[serde(default)]
    pub is_killer: bool,
}

/// The case content produced by a content provider
///
/// Everything here becomes immutable session data once installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    /// Time and place, e.g. "A steamboat on the Nile, 1917"
    pub setting: String,
    pub victim: String,
    pub murder_weapon: String,
    pub murder_location: String,
    pub murder_time: String,
    pub backstory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongings: Option<String>,
    pub characters: Vec<Suspect>,
}

impl CaseFile {
    /// Check the roster against the invariants a session relies on.
    ///
    /// The roster must hold exactly `expected_suspects` suspects with unique,
    /// non-empty ids, and exactly one of them must be the killer.
    pub fn validate(&self, expected_suspects: usize) -> Result<(), DomainError> {
        if self.characters.is_empty() {
            return Err(DomainError::InvalidCase("case has no suspects".to_string()));
        }

        if self.characters.len() != expected_suspects {
            return Err(DomainError::InvalidCase(format!(
                "expected {} suspects, got {}",
                expected_suspects,
                self.characters.len()
            )));
        }

        let mut seen = HashSet::new();
        for suspect in &self.characters {
            if suspect.id.trim().is_empty() {
                return Err(DomainError::InvalidCase(format!(
                    "suspect '{}' has an empty id",
                    suspect.name
                )));
            }
            if !seen.insert(suspect.id.as_str()) {
                return Err(DomainError::InvalidCase(format!(
                    "duplicate suspect id '{}'",
                    suspect.id
                )));
            }
        }

        let killers = self.characters.iter().filter(|s| s.is_killer).count();
        if killers != 1 {
            return Err(DomainError::InvalidCase(format!(
                "expected exactly one killer, found {}",
                killers
            )));
        }

        Ok(())
    }

    pub fn killer(&self) -> Option<&Suspect> {
        self.characters.iter().find(|s| s.is_killer)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_valid_case() {
        let case = case_with(5, 2);
        assert!(case.validate(5).is_ok());
        assert_eq!(case.killer().unwrap().id, "s2");
    }

    #[test]
    fn test_wrong_suspect_count() {
        let err = case_with(4, 0).validate(5).unwrap_err();
        assert!(err.to_string().contains("expected 5 suspects, got 4"));
    }

    #[test]
    fn test_no_killer() {
        let case = case_with(3, 99);
        assert!(matches!(case.validate(3), Err(DomainError::InvalidCase(_))));
    }

    #[test]
    fn test_two_killers() {
        let mut case = case_with(3, 0);
        case.characters[1].is_killer = true;
        let err = case.validate(3).unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_duplicate_ids() {
        let mut case = case_with(3, 0);
        case.characters[2].id = "s1".to_string();
        let err = case.validate(3).unwrap_err();
        assert!(err.to_string().contains("duplicate suspect id 's1'"));
    }

    #[test]
    fn test_empty_roster() {
        let case = case_with(0, 0);
        assert!(case.validate(0).is_err());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "setting": "Orient Express, 1934",
            "victim": "Mr. Ratchett",
            "murderWeapon": "Knife",
            "murderLocation": "Compartment 2",
            "murderTime": "1:15 AM",
            "backstory": "Snowbound train",
            "characters": [
                {"id": "a", "name": "Hector", "age": 44, "occupation": "Secretary",
                 "description": "Nervous", "backstory": "Hired a year ago",
                 "alibi": "Asleep", "connections": ["Greta"], "isKiller": true}
            ]
        }"#;
        let case: CaseFile = serde_json::from_str(json).unwrap();
        assert_eq!(case.murder_weapon, "Knife");
        assert!(case.belongings.is_none());
        assert!(case.characters[0].is_killer);
        assert_eq!(case.characters[0].connections, vec!["Greta".to_string()]);
    }
}
