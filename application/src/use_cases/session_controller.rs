//! Session controller use case.
//!
//! Owns the single live [`Session`] and drives its lifecycle:
//!
//! 1. `start_new_game`: generate a case sized by difficulty, enter `intro`
//! 2. `start_investigation`: `intro → investigation`
//! 3. `ask_character`: capped per-suspect questioning via the content provider
//! 4. `make_accusation`: resolve to `won` or `lost`
//!
//! Every mutation is applied to a copy of the session, saved, and only then
//! installed, so a failed step never leaves the live session half-updated.

use crate::config::GameRules;
use crate::ports::case_provider::{CaseContentProvider, ProviderError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::restart::{NoRestart, RestartHandler};
use crate::ports::session_store::{LoadOutcome, SessionStore, StoreError};
use noire_domain::{Difficulty, DomainError, Question, Session};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors surfaced by the [`SessionController`].
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No active game. Please start a new game first.")]
    NoActiveSession,

    #[error("Suspect not found: {0}")]
    SuspectNotFound(String),

    #[error("Question limit reached: {limit} questions already asked of {suspect_id}")]
    QuestionLimitReached { suspect_id: String, limit: usize },

    #[error("Content generation failed: {0}")]
    GenerationFailure(#[from] ProviderError),

    #[error("Invalid input: {0}")]
    InvalidInput(DomainError),

    #[error("Failed to save game: {0}")]
    Persistence(#[from] StoreError),
}

impl SessionError {
    /// The inline, non-fatal "ask someone else" condition
    pub fn is_question_limit(&self) -> bool {
        matches!(self, SessionError::QuestionLimitReached { .. })
    }

    pub fn is_generation_failure(&self) -> bool {
        matches!(self, SessionError::GenerationFailure(_))
    }
}

impl From<DomainError> for SessionError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::UnknownSuspect(id) => SessionError::SuspectNotFound(id),
            DomainError::QuestionLimitReached { suspect_id, limit } => {
                SessionError::QuestionLimitReached { suspect_id, limit }
            }
            DomainError::InvalidCase(reason) => {
                SessionError::GenerationFailure(ProviderError::MalformedCase(reason))
            }
            other => SessionError::InvalidInput(other),
        }
    }
}

/// Outcome of an accusation, with the session it closed.
#[derive(Debug)]
pub struct Verdict<'a> {
    pub correct: bool,
    pub session: &'a Session,
}

/// Controller for one game session at a time.
///
/// Constructed by the host and held for the life of the UI. Operations
/// take `&mut self`, so calls are naturally serialized.
pub struct SessionController {
    provider: Arc<dyn CaseContentProvider>,
    store: Arc<dyn SessionStore>,
    restart_handler: Arc<dyn RestartHandler>,
    conversation_logger: Arc<dyn ConversationLogger>,
    rules: GameRules,
    session: Option<Session>,
}

impl SessionController {
    /// Create a controller with no live session. Nothing is read from the
    /// store until [`resume_saved_game`](Self::resume_saved_game) is called.
    pub fn new(provider: Arc<dyn CaseContentProvider>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            provider,
            store,
            restart_handler: Arc::new(NoRestart),
            conversation_logger: Arc::new(NoConversationLogger),
            rules: GameRules::default(),
            session: None,
        }
    }

    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_restart_handler(mut self, handler: Arc<dyn RestartHandler>) -> Self {
        self.restart_handler = handler;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Generate a fresh case and install it in the `intro` phase.
    ///
    /// Any previous session is dropped and its saved copy cleared first; if
    /// generation fails, the controller is left with no session at all.
    pub async fn start_new_game(
        &mut self,
        difficulty: Option<Difficulty>,
    ) -> Result<&Session, SessionError> {
        let difficulty = difficulty.unwrap_or(self.rules.default_difficulty);
        let config = difficulty.config();

        self.session = None;
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear saved game before starting a new one: {}", e);
        }

        info!(
            "Generating {} case with {} suspects",
            config.label, config.suspect_count
        );

        let case = self
            .provider
            .generate_case(config.suspect_count)
            .await
            .inspect_err(|e| warn!("Case generation failed: {}", e))?;
        case.validate(config.suspect_count)
            .inspect_err(|e| warn!("Provider returned an unusable case: {}", e))?;

        let session = Session::new(Uuid::new_v4().to_string(), difficulty, case)
            .with_question_policy(self.rules.question_policy);
        self.store.save(&session)?;

        self.conversation_logger.log(ConversationEvent::new(
            "case_generated",
            serde_json::json!({
                "session_id": session.id(),
                "difficulty": difficulty.as_str(),
                "suspects": session.suspects().len(),
                "setting": session.case().setting,
            }),
        ));
        info!("Started session {}", session.id());

        Ok(self.session.insert(session))
    }

    /// Move the live session from `intro` to `investigation`.
    pub fn start_investigation(&mut self) -> Result<&Session, SessionError> {
        let mut draft = self.live_session()?.clone();
        draft.begin_investigation()?;
        self.store.save(&draft)?;

        self.conversation_logger.log(ConversationEvent::new(
            "investigation_started",
            serde_json::json!({ "session_id": draft.id() }),
        ));
        debug!("Session {} entered investigation", draft.id());

        Ok(self.session.insert(draft))
    }

    /// Put a question to a suspect and record their answer.
    ///
    /// The cap stored in the session is checked synchronously before the
    /// provider is called. If
    /// the provider fails, the question is discarded along with the rest of
    /// the draft, so the live thread and the saved copy stay as they were
    /// and the question does not count against the cap.
    pub async fn ask_character(
        &mut self,
        suspect_id: &str,
        question: &str,
    ) -> Result<&Session, SessionError> {
        let mut draft = self.live_session()?.clone();
        let question = Question::try_from(question)?;

        let history = match draft.record_question(suspect_id, &question) {
            Ok(history) => history,
            Err(e @ DomainError::QuestionLimitReached { .. }) => {
                self.conversation_logger.log(ConversationEvent::new(
                    "question_limit_reached",
                    serde_json::json!({
                        "session_id": draft.id(),
                        "suspect_id": suspect_id,
                        "limit": draft.question_policy().limit(),
                    }),
                ));
                info!("Question limit reached for suspect {}", suspect_id);
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        let suspect = draft
            .suspect(suspect_id)
            .cloned()
            .ok_or_else(|| SessionError::SuspectNotFound(suspect_id.to_string()))?;

        self.conversation_logger.log(ConversationEvent::new(
            "question",
            serde_json::json!({
                "session_id": draft.id(),
                "suspect_id": suspect_id,
                "text": question.content(),
            }),
        ));
        debug!(
            "Asking {} ({} turns of history)",
            suspect.name,
            history.len()
        );

        let reply = self
            .provider
            .generate_reply(&suspect, question.content(), &history)
            .await
            .inspect_err(|e| warn!("Reply generation failed for {}: {}", suspect_id, e))?;

        draft.record_reply(suspect_id, reply.response.as_str(), reply.is_lie)?;
        self.store.save(&draft)?;

        self.conversation_logger.log(ConversationEvent::new(
            "reply",
            serde_json::json!({
                "session_id": draft.id(),
                "suspect_id": suspect_id,
                "text": reply.response,
                "is_lie": reply.is_lie,
            }),
        ));

        Ok(self.session.insert(draft))
    }

    /// Accuse a suspect, ending the case as `won` or `lost`.
    ///
    /// The phase is not checked: accusing again after the case is closed
    /// re-resolves it.
    pub fn make_accusation(&mut self, suspect_id: &str) -> Result<Verdict<'_>, SessionError> {
        let mut draft = self.live_session()?.clone();
        let correct = draft.resolve_accusation(suspect_id)?;
        self.store.save(&draft)?;

        self.conversation_logger.log(ConversationEvent::new(
            "accusation",
            serde_json::json!({
                "session_id": draft.id(),
                "suspect_id": suspect_id,
                "correct": correct,
            }),
        ));
        info!(
            "Accusation of {} was {}",
            suspect_id,
            if correct { "correct" } else { "wrong" }
        );

        Ok(Verdict {
            correct,
            session: self.session.insert(draft),
        })
    }

    /// Drop the live session and clear the saved copy.
    pub fn reset_game(&mut self) {
        if let Some(session) = self.session.take() {
            self.conversation_logger.log(ConversationEvent::new(
                "session_reset",
                serde_json::json!({ "session_id": session.id() }),
            ));
        }
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear saved game: {}", e);
        }
    }

    /// Reset, then ask the host to restart. The restart happens even if
    /// clearing the store failed.
    pub fn reset_and_reload(&mut self) {
        self.reset_game();
        self.restart_handler.restart();
    }

    pub fn game_state(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether the store holds a usable session. Never fails.
    pub fn has_saved_game(&self) -> bool {
        self.load_saved().is_some()
    }

    /// Install the saved session, if there is a usable one.
    pub fn resume_saved_game(&mut self) -> Option<&Session> {
        let session = self.load_saved()?;

        info!(
            "Resumed session {} in phase {}",
            session.id(),
            session.current_phase()
        );
        Some(self.session.insert(session))
    }

    /// Questions the player may still put to a suspect.
    pub fn remaining_questions(&self, suspect_id: &str) -> Result<usize, SessionError> {
        Ok(self.live_session()?.remaining_questions(suspect_id)?)
    }

    /// Read the saved session. A blob that parses but holds an unplayable
    /// case is cleared, the same as unparseable data.
    fn load_saved(&self) -> Option<Session> {
        let session = match self.store.load() {
            Ok(outcome @ LoadOutcome::Restored(_)) => outcome.into_session(),
            Ok(LoadOutcome::Empty) => None,
            Ok(LoadOutcome::Corrupt { reason }) => {
                warn!("Discarded corrupt saved game: {}", reason);
                None
            }
            Err(e) => {
                warn!("Failed to load saved game: {}", e);
                None
            }
        }?;

        if let Err(e) = session
            .case()
            .validate(session.difficulty().suspect_count())
        {
            warn!("Discarded unplayable saved game {}: {}", session.id(), e);
            if let Err(e) = self.store.clear() {
                warn!("Failed to clear saved game: {}", e);
            }
            return None;
        }

        Some(session)
    }

    fn live_session(&self) -> Result<&Session, SessionError> {
        self.session.as_ref().ok_or(SessionError::NoActiveSession)
    }
}
