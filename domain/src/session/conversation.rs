//! Conversation threads between the player and a suspect

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Player,
    Character,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Player => "player",
            Speaker::Character => "character",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line of dialogue (Entity, immutable once created)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Only meaningful for `Speaker::Character`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_lie: Option<bool>,
}

impl Message {
    pub fn player(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            content: content.into(),
            timestamp: Utc::now(),
            is_lie: None,
        }
    }

    pub fn character(content: impl Into<String>, is_lie: bool) -> Self {
        Self {
            speaker: Speaker::Character,
            content: content.into(),
            timestamp: Utc::now(),
            is_lie: Some(is_lie),
        }
    }

    pub fn is_from_player(&self) -> bool {
        self.speaker == Speaker::Player
    }

    pub fn is_flagged_lie(&self) -> bool {
        self.speaker == Speaker::Character && self.is_lie == Some(true)
    }
}

/// Speaker-tagged line handed to a content provider as dialogue history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub speaker: Speaker,
    pub content: String,
}

impl std::fmt::Display for DialogueTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.speaker, self.content)
    }
}

/// Append-only message history with one suspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationThread {
    suspect_id: String,
    messages: Vec<Message>,
}

impl ConversationThread {
    pub fn new(suspect_id: impl Into<String>) -> Self {
        Self {
            suspect_id: suspect_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn suspect_id(&self) -> &str {
        &self.suspect_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn player_question_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_from_player()).count()
    }

    /// The thread in insertion order, as handed to a content provider.
    pub fn history(&self) -> Vec<DialogueTurn> {
        self.messages
            .iter()
            .map(|m| DialogueTurn {
                speaker: m.speaker,
                content: m.content.clone(),
            })
            .collect()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_preserves_order_and_speaker() {
        let mut thread = ConversationThread::new("s1");
        thread.push(Message::player("Where were you?"));
        thread.push(Message::character("In the garden.", true));
        thread.push(Message::player("Alone?"));

        let history = thread.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].speaker, Speaker::Player);
        assert_eq!(history[1].content, "In the garden.");
        assert_eq!(history[2].to_string(), "player: Alone?");
        assert_eq!(thread.player_question_count(), 2);
        assert!(thread.messages().last().unwrap().is_from_player());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::player("Hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["speaker"], "player");
        assert!(json.get("isLie").is_none());

        let reply = Message::character("Good evening.", false);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["isLie"], false);
    }

    #[test]
    fn test_flagged_lie_only_for_character() {
        let mut msg = Message::player("?");
        msg.is_lie = Some(true);
        assert!(!msg.is_flagged_lie());
        assert!(Message::character("No.", true).is_flagged_lie());
    }
}
