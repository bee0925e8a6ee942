//! Assessment session (response collector).
//!
//! Walks a [`Catalog`] one question at a time. It is a plain state machine:
//! no ambient storage, no threads. The caller owns the session and passes
//! the result store in when it advances.
//!
//! ## State Transitions
//!
//! ```text
//! InProgress(0) <-> InProgress(1) <-> ... <-> InProgress(N-1) -> Submitted
//! ```
//!
//! Moving forward requires the current question to be answered. Advancing
//! from the last answered question finalizes: responses are scored, the
//! result is written under [`RESULT_KEY`](crate::storage::RESULT_KEY) and
//! the session becomes `Submitted`. Commands that can't apply in the current
//! state return `None` and change nothing.
//!
//! ## Usage
//!
//! ```ignore
//! let catalog = Catalog::esg_governance();
//! let store = MemoryStore::new();
//! let mut session = AssessmentSession::new(&catalog);
//! session.record_response("psych1", 3)?;
//! session.advance(&store)?; // Some(Event::Advanced { .. })
//! ```

use chrono::Utc;
use serde::Serialize;

use crate::catalog::{Catalog, Question};
use crate::error::{AssessmentError, CoreError};
use crate::events::Event;
use crate::scoring::{self, ResponseSet, ScoreResult, ScoringPolicy};
use crate::storage::{self, ResultStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    InProgress,
    Submitted,
}

/// What the presentation layer needs to render one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepView<'a> {
    pub index: usize,
    pub total: usize,
    pub question: &'a Question,
    pub selected: Option<usize>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub is_last: bool,
    /// 0.0 .. 100.0, counting the current question as reached.
    pub progress_pct: f64,
}

/// One run through the catalog.
#[derive(Debug, Clone)]
pub struct AssessmentSession<'a> {
    id: String,
    catalog: &'a Catalog,
    policy: ScoringPolicy,
    state: SessionState,
    current_index: usize,
    responses: ResponseSet,
    result: Option<ScoreResult>,
}

impl<'a> AssessmentSession<'a> {
    /// Start at the first question with the default scoring policy.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_policy(catalog, ScoringPolicy::default())
    }

    pub fn with_policy(catalog: &'a Catalog, policy: ScoringPolicy) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(session_id = %id, questions = catalog.len(), "assessment session started");
        Self {
            id,
            catalog,
            policy,
            state: SessionState::InProgress,
            current_index: 0,
            responses: ResponseSet::new(),
            result: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &'a Question {
        let catalog: &'a Catalog = self.catalog;
        // index stays within 0..len, and catalogs are never empty
        &catalog.questions()[self.current_index]
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.catalog.len()
    }

    pub fn can_advance(&self) -> bool {
        self.state == SessionState::InProgress
            && self.responses.contains(&self.current_question().id)
    }

    pub fn can_retreat(&self) -> bool {
        self.state == SessionState::InProgress && self.current_index > 0
    }

    pub fn progress_pct(&self) -> f64 {
        (self.current_index + 1) as f64 / self.catalog.len() as f64 * 100.0
    }

    pub fn view(&self) -> StepView<'a> {
        let question = self.current_question();
        StepView {
            index: self.current_index,
            total: self.catalog.len(),
            question,
            selected: self.responses.get(&question.id),
            can_advance: self.can_advance(),
            can_retreat: self.can_retreat(),
            is_last: self.is_last(),
            progress_pct: self.progress_pct(),
        }
    }

    /// Build a snapshot event of the current step.
    pub fn snapshot(&self) -> Event {
        let question = self.current_question();
        Event::StepSnapshot {
            index: self.current_index,
            total: self.catalog.len(),
            question_id: question.id.clone(),
            category: question.category(),
            selected: self.responses.get(&question.id),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Insert or overwrite the answer for any catalog question.
    ///
    /// # Errors
    /// Returns [`AssessmentError::UnknownQuestion`],
    /// [`AssessmentError::OptionOutOfRange`], or
    /// [`AssessmentError::AlreadySubmitted`].
    pub fn record_response(
        &mut self,
        question_id: &str,
        option_index: usize,
    ) -> Result<Event, AssessmentError> {
        if self.state == SessionState::Submitted {
            return Err(AssessmentError::AlreadySubmitted);
        }
        let question = self
            .catalog
            .find(question_id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(question_id.to_string()))?;
        if option_index >= question.options.len() {
            return Err(AssessmentError::OptionOutOfRange {
                question_id: question_id.to_string(),
                index: option_index,
                len: question.options.len(),
            });
        }

        let previous = self.responses.insert(question_id, option_index);
        tracing::debug!(question_id, option_index, ?previous, "response recorded");
        Ok(Event::ResponseRecorded {
            question_id: question_id.to_string(),
            option_index,
            previous,
            at: Utc::now(),
        })
    }

    /// Answer the question currently shown.
    pub fn answer_current(&mut self, option_index: usize) -> Result<Event, AssessmentError> {
        let id = self.current_question().id.as_str();
        self.record_response(id, option_index)
    }

    /// Move forward, finalizing from the last question.
    ///
    /// Returns `Ok(None)` when the current question is unanswered or the
    /// session is already submitted.
    ///
    /// # Errors
    /// Scoring and storage failures during finalize. Nothing is persisted
    /// and the session stays on the last question.
    pub fn advance(&mut self, store: &dyn ResultStore) -> Result<Option<Event>, CoreError> {
        if !self.can_advance() {
            tracing::debug!(
                index = self.current_index,
                state = ?self.state,
                "advance ignored: illegal transition"
            );
            return Ok(None);
        }

        if !self.is_last() {
            let from = self.current_index;
            self.current_index += 1;
            return Ok(Some(Event::Advanced {
                from_index: from,
                to_index: self.current_index,
                at: Utc::now(),
            }));
        }

        self.finalize(store).map(Some)
    }

    /// Move back one question. `None` at the first question.
    pub fn retreat(&mut self) -> Option<Event> {
        if !self.can_retreat() {
            tracing::debug!(index = self.current_index, "retreat ignored: illegal transition");
            return None;
        }
        let from = self.current_index;
        self.current_index -= 1;
        Some(Event::Retreated {
            from_index: from,
            to_index: self.current_index,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn finalize(&mut self, store: &dyn ResultStore) -> Result<Event, CoreError> {
        let result = scoring::score_with(self.catalog, &self.responses, &self.policy)?;
        storage::save_result(store, &result)?;

        self.state = SessionState::Submitted;
        self.result = Some(result);
        tracing::info!(
            session_id = %self.id,
            overall = result.overall,
            recommendation = %result.recommendation,
            "assessment submitted"
        );
        Ok(Event::AssessmentSubmitted {
            session_id: self.id.clone(),
            result,
            at: Utc::now(),
        })
    }
}
