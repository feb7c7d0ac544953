//! Offline content provider.
//!
//! Builds cases from fixed tables and answers questions with simple rules,
//! so the game can be played without network access. Innocent suspects
//! always tell the truth; the killer lies only about their alibi.

use async_trait::async_trait;
use noire_application::ports::case_provider::{
    CaseContentProvider, CharacterReply, ProviderError,
};
use noire_domain::{CaseFile, DialogueTurn, Speaker, Suspect};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::debug;

const SETTINGS: &[&str] = &[
    "A grand hotel in New York, 1962",
    "A paddle steamer on the Nile, 1917",
    "A ski resort in the Alps, 2004",
    "A restaurant atop a Dubai skyscraper, present day",
    "A country manor in Yorkshire, 1928",
    "A night train from Vienna to Venice, 1936",
];

const VICTIMS: &[&str] = &[
    "Reginald Ashcombe, a shipping magnate",
    "Countess Vera Lindqvist, a retired opera star",
    "Dr. Felix Marsh, a society physician",
    "Celeste Moreau, a fashion photographer",
    "Howard Vance, a real-estate developer",
];

const WEAPONS: &[&str] = &[
    "a brass candlestick",
    "a silk scarf",
    "a letter opener",
    "a vial of digitalis",
    "an antique revolver",
    "an ice axe",
];

const LOCATIONS: &[&str] = &[
    "the library",
    "the wine cellar",
    "the observation deck",
    "the private dining room",
    "the conservatory",
    "the service corridor",
];

const TIMES: &[&str] = &[
    "shortly before midnight",
    "around 2 a.m.",
    "just after the dinner gong",
    "during the fireworks at 11 p.m.",
    "at dawn",
];

const FIRST_NAMES: &[&str] = &[
    "Agatha", "Bernard", "Clara", "Desmond", "Eleanor", "Fitz", "Greta", "Hector", "Ingrid",
    "Julian", "Lydia", "Maxim", "Nora", "Oscar",
];

const LAST_NAMES: &[&str] = &[
    "Hale", "Whitmore", "Okafor", "Castellane", "Brandt", "Quill", "Sato", "Ferris", "Lowell",
    "Marchetti",
];

const OCCUPATIONS: &[&str] = &[
    "butler",
    "chauffeur",
    "heiress",
    "private secretary",
    "jazz pianist",
    "retired colonel",
    "chef",
    "art dealer",
    "nurse",
    "journalist",
];

const DESCRIPTIONS: &[&str] = &[
    "Soft-spoken, with nervous hands",
    "Charming and quick to laugh",
    "Stern, never without a pocket watch",
    "Sharp-tongued and impatient",
    "Elegant, with an air of old money",
    "Watchful and slow to answer",
];

const ALIBIS: &[&str] = &[
    "playing cards in the lounge",
    "asleep in my room",
    "on the terrace having a cigarette",
    "in the kitchen preparing tomorrow's menu",
    "writing letters in the study",
    "at the bar listening to the band",
];

const MOTIVES: &[&str] = &[
    "owed the victim a great deal of money",
    "was cut out of the victim's will last spring",
    "had been quarrelling with the victim for weeks",
    "knew a secret the victim wanted buried",
    "was once engaged to the victim",
];

/// Procedural case generator and rule-based interviewer
pub struct OfflineProvider {
    rng: Mutex<StdRng>,
}

impl OfflineProvider {
    /// Provider with a fixed seed; the same seed yields the same cases.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, ProviderError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError::Request("offline generator lock poisoned".to_string()))?;
        Ok(f(&mut rng))
    }
}

impl Default for OfflineProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn pick<'a>(rng: &mut StdRng, table: &[&'a str]) -> &'a str {
    table.choose(rng).copied().unwrap_or_default()
}

fn build_case(rng: &mut StdRng, suspect_count: usize) -> CaseFile {
    let mut first_names = FIRST_NAMES.to_vec();
    first_names.shuffle(rng);
    let names: Vec<String> = first_names
        .iter()
        .cycle()
        .take(suspect_count)
        .enumerate()
        .map(|(i, first)| {
            let last = LAST_NAMES[(i + rng.gen_range(0..LAST_NAMES.len())) % LAST_NAMES.len()];
            format!("{} {}", first, last)
        })
        .collect();

    let killer_index = rng.gen_range(0..suspect_count.max(1));
    let murder_location = pick(rng, LOCATIONS);

    let characters = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut others: Vec<&String> = names.iter().filter(|n| *n != name).collect();
            others.shuffle(rng);
            let connections = others
                .into_iter()
                .take(rng.gen_range(1..=2))
                .cloned()
                .collect();

            let is_killer = i == killer_index;
            let alibi = if is_killer {
                format!(
                    "Claims to have been {}, though nobody remembers seeing them there",
                    pick(rng, ALIBIS)
                )
            } else {
                format!("Was {}", pick(rng, ALIBIS))
            };

            Suspect {
                id: format!("suspect-{}", i + 1),
                name: name.clone(),
                age: rng.gen_range(22..=78),
                occupation: pick(rng, OCCUPATIONS).to_string(),
                description: pick(rng, DESCRIPTIONS).to_string(),
                backstory: format!("Arrived three days ago and {}.", pick(rng, MOTIVES)),
                alibi,
                connections,
                is_killer,
            }
        })
        .collect();

    CaseFile {
        setting: pick(rng, SETTINGS).to_string(),
        victim: pick(rng, VICTIMS).to_string(),
        murder_weapon: pick(rng, WEAPONS).to_string(),
        murder_location: murder_location.to_string(),
        murder_time: pick(rng, TIMES).to_string(),
        backstory: format!(
            "The body was found in {} after the guests had retired for the night.",
            murder_location
        ),
        belongings: None,
        characters,
    }
}

/// What a question is about, judged by keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Alibi,
    Connections,
    Victim,
    Background,
    Other,
}

fn classify(question: &str) -> Topic {
    let q = question.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| q.contains(w));

    if has(&["where", "alibi", "last night", "doing", "when", "see you"]) {
        Topic::Alibi
    } else if has(&["know", "friend", "who else", "relationship", "connection"]) {
        Topic::Connections
    } else if has(&["victim", "dead", "kill", "murder", "body", "weapon"]) {
        Topic::Victim
    } else if has(&["who are you", "yourself", "job", "work", "why are you here"]) {
        Topic::Background
    } else {
        Topic::Other
    }
}

/// Trim a stored alibi ("Was playing cards ...") down to the activity.
fn alibi_activity(suspect: &Suspect) -> String {
    let alibi = suspect.alibi.trim_end_matches('.');
    let alibi = alibi
        .strip_prefix("Claims to have been ")
        .and_then(|rest| rest.split(", though").next())
        .or_else(|| alibi.strip_prefix("Was "))
        .unwrap_or(alibi);
    alibi.to_string()
}

fn build_reply(
    rng: &mut StdRng,
    suspect: &Suspect,
    question: &str,
    history: &[DialogueTurn],
) -> CharacterReply {
    let asked_before = history
        .iter()
        .filter(|t| t.speaker == Speaker::Player)
        .count()
        .saturating_sub(1);
    let connection = suspect
        .connections
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| "one of the staff".to_string());

    match classify(question) {
        Topic::Alibi if suspect.is_killer => {
            let cover = pick(rng, ALIBIS);
            CharacterReply::new(
                format!(
                    "I was {}, the whole evening. Ask {} if you doubt me.",
                    cover, connection
                ),
                true,
            )
        }
        Topic::Alibi => CharacterReply::new(
            format!(
                "I was {}. {} saw me there, I'm quite sure of it.",
                alibi_activity(suspect),
                connection
            ),
            false,
        ),
        Topic::Connections => CharacterReply::new(
            format!(
                "I know {} well enough. We have crossed paths more than once this week.",
                connection
            ),
            false,
        ),
        Topic::Victim => CharacterReply::new(
            "A dreadful business. I won't pretend we were close, but nobody deserved that."
                .to_string(),
            false,
        ),
        Topic::Background => CharacterReply::new(
            format!(
                "I'm a {}, {} years old. {}",
                suspect.occupation, suspect.age, suspect.backstory
            ),
            false,
        ),
        Topic::Other if asked_before >= 5 => CharacterReply::new(
            "I have told you everything I know, detective.".to_string(),
            false,
        ),
        Topic::Other => {
            let deflections = [
                "I'm not sure what you mean.",
                "You should be asking the others that.",
                "Is that really important right now?",
            ];
            CharacterReply::new(pick(rng, &deflections).to_string(), false)
        }
    }
}

#[async_trait]
impl CaseContentProvider for OfflineProvider {
    async fn generate_case(&self, suspect_count: usize) -> Result<CaseFile, ProviderError> {
        if suspect_count == 0 {
            return Err(ProviderError::MalformedCase(
                "cannot build a case without suspects".to_string(),
            ));
        }
        let case = self.with_rng(|rng| build_case(rng, suspect_count))?;
        debug!("Generated offline case: {}", case.setting);
        Ok(case)
    }

    async fn generate_reply(
        &self,
        suspect: &Suspect,
        question: &str,
        history: &[DialogueTurn],
    ) -> Result<CharacterReply, ProviderError> {
        self.with_rng(|rng| build_reply(rng, suspect, question, history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_case_matches_requested_size() {
        let provider = OfflineProvider::with_seed(7);
        for count in [3, 5, 7] {
            let case = provider.generate_case(count).await.unwrap();
            assert!(case.validate(count).is_ok(), "invalid case for {}", count);
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_case() {
        let a = OfflineProvider::with_seed(42).generate_case(5).await.unwrap();
        let b = OfflineProvider::with_seed(42).generate_case(5).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_connections_name_other_suspects() {
        let case = OfflineProvider::with_seed(3).generate_case(7).await.unwrap();
        let names: Vec<&str> = case.characters.iter().map(|s| s.name.as_str()).collect();
        for suspect in &case.characters {
            assert!(!suspect.connections.is_empty());
            for connection in &suspect.connections {
                assert_ne!(connection, &suspect.name);
                assert!(names.contains(&connection.as_str()));
            }
        }
    }

    #[tokio::test]
    async fn test_zero_suspects_is_rejected() {
        let err = OfflineProvider::with_seed(1).generate_case(0).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedCase(_)));
    }

    #[tokio::test]
    async fn test_only_killer_lies_about_alibi() {
        let provider = OfflineProvider::with_seed(11);
        let case = provider.generate_case(5).await.unwrap();

        for suspect in &case.characters {
            let reply = provider
                .generate_reply(suspect, "Where were you last night?", &[])
                .await
                .unwrap();
            assert_eq!(reply.is_lie, suspect.is_killer, "{}", suspect.name);

            let reply = provider
                .generate_reply(suspect, "Tell me about yourself", &[])
                .await
                .unwrap();
            assert!(!reply.is_lie);
            assert!(reply.response.contains(&suspect.occupation));
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Where were you at midnight?"), Topic::Alibi);
        assert_eq!(classify("Do you know Greta?"), Topic::Connections);
        assert_eq!(classify("What about the weapon?"), Topic::Victim);
        assert_eq!(classify("What is your job?"), Topic::Background);
        assert_eq!(classify("Nice weather"), Topic::Other);
    }

    #[test]
    fn test_alibi_activity() {
        let mut suspect = Suspect {
            id: "x".to_string(),
            name: "X".to_string(),
            age: 30,
            occupation: "chef".to_string(),
            description: String::new(),
            backstory: String::new(),
            alibi: "Was writing letters in the study".to_string(),
            connections: vec![],
            is_killer: false,
        };
        assert_eq!(alibi_activity(&suspect), "writing letters in the study");

        suspect.alibi =
            "Claims to have been asleep in my room, though nobody remembers seeing them there"
                .to_string();
        assert_eq!(alibi_activity(&suspect), "asleep in my room");
    }
}
