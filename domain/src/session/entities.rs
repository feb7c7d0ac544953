//! Session aggregate root

use crate::case::entities::{CaseFile, Suspect};
use crate::core::error::DomainError;
use crate::core::question::Question;
use crate::policy::difficulty::Difficulty;
use crate::policy::question_limit::QuestionPolicy;
use crate::session::conversation::{ConversationThread, DialogueTurn, Message};
use crate::session::phase::Phase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One playthrough of a mystery (Aggregate Root)
///
/// The case content, suspect roster and question cap are fixed at
/// creation. Only the phase and the conversation threads change afterwards,
/// and threads only ever grow.
///
/// Serialized with camelCase keys and the case fields flattened at the top
/// level, which is the blob the session store persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: String,
    #[serde(flatten)]
    case: CaseFile,
    difficulty: Difficulty,
    #[serde(default)]
    question_policy: QuestionPolicy,
    #[serde(default)]
    conversations: BTreeMap<String, ConversationThread>,
    current_phase: Phase,
}

impl Session {
    /// Create a session in the `Intro` phase with no conversations.
    pub fn new(id: impl Into<String>, difficulty: Difficulty, case: CaseFile) -> Self {
        Self {
            id: id.into(),
            case,
            difficulty,
            question_policy: QuestionPolicy::default(),
            conversations: BTreeMap::new(),
            current_phase: Phase::Intro,
        }
    }

    /// Set the per-suspect question cap for the life of the session.
    pub fn with_question_policy(mut self, policy: QuestionPolicy) -> Self {
        self.question_policy = policy;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn case(&self) -> &CaseFile {
        &self.case
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn question_policy(&self) -> QuestionPolicy {
        self.question_policy
    }

    /// Questions the player may still put to a suspect.
    pub fn remaining_questions(&self, suspect_id: &str) -> Result<usize, DomainError> {
        if self.suspect(suspect_id).is_none() {
            return Err(DomainError::UnknownSuspect(suspect_id.to_string()));
        }
        Ok(self
            .question_policy
            .remaining(self.conversations.get(suspect_id)))
    }

    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.case.characters
    }

    pub fn suspect(&self, suspect_id: &str) -> Option<&Suspect> {
        self.case.characters.iter().find(|s| s.id == suspect_id)
    }

    pub fn conversation(&self, suspect_id: &str) -> Option<&ConversationThread> {
        self.conversations.get(suspect_id)
    }

    pub fn conversations(&self) -> impl Iterator<Item = &ConversationThread> {
        self.conversations.values()
    }

    /// Move from `Intro` to `Investigation`.
    ///
    /// Repeating the call during the investigation is a no-op. Terminal
    /// phases cannot be reopened.
    pub fn begin_investigation(&mut self) -> Result<(), DomainError> {
        match self.current_phase {
            Phase::Intro => {
                self.current_phase = Phase::Investigation;
                Ok(())
            }
            Phase::Investigation => Ok(()),
            from @ (Phase::Won | Phase::Lost) => Err(DomainError::InvalidTransition {
                from,
                to: Phase::Investigation,
            }),
        }
    }

    /// Append a player question to the suspect's thread, creating the
    /// thread on first use, and return the dialogue history to answer.
    ///
    /// The cap is checked before anything is appended, so a rejected
    /// question leaves every thread untouched.
    pub fn record_question(
        &mut self,
        suspect_id: &str,
        question: &Question,
    ) -> Result<Vec<DialogueTurn>, DomainError> {
        if self.suspect(suspect_id).is_none() {
            return Err(DomainError::UnknownSuspect(suspect_id.to_string()));
        }

        if !self
            .question_policy
            .allows_another(self.conversations.get(suspect_id))
        {
            return Err(DomainError::QuestionLimitReached {
                suspect_id: suspect_id.to_string(),
                limit: self.question_policy.limit(),
            });
        }

        let thread = self
            .conversations
            .entry(suspect_id.to_string())
            .or_insert_with(|| ConversationThread::new(suspect_id));
        thread.push(Message::player(question.content()));
        Ok(thread.history())
    }

    /// Append a suspect's reply to an existing thread.
    pub fn record_reply(
        &mut self,
        suspect_id: &str,
        response: impl Into<String>,
        is_lie: bool,
    ) -> Result<(), DomainError> {
        let thread = self
            .conversations
            .get_mut(suspect_id)
            .ok_or_else(|| DomainError::UnknownSuspect(suspect_id.to_string()))?;
        thread.push(Message::character(response, is_lie));
        Ok(())
    }

    /// Resolve an accusation, moving to `Won` or `Lost`.
    ///
    /// Returns whether the accused is the killer. The current phase is not
    /// checked, so a finished case can be re-resolved.
    pub fn resolve_accusation(&mut self, suspect_id: &str) -> Result<bool, DomainError> {
        let is_killer = self
            .suspect(suspect_id)
            .map(|s| s.is_killer)
            .ok_or_else(|| DomainError::UnknownSuspect(suspect_id.to_string()))?;

        self.current_phase = if is_killer { Phase::Won } else { Phase::Lost };
        Ok(is_killer)
    }
}
