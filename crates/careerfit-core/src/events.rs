use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::scoring::ScoreResult;

/// Every state change of an assessment session produces an Event.
/// The presentation layer renders from them; `AssessmentSubmitted` is the
/// signal to switch to the results view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ResponseRecorded {
        question_id: String,
        option_index: usize,
        /// Answer this one replaced, if any.
        previous: Option<usize>,
        at: DateTime<Utc>,
    },
    Advanced {
        from_index: usize,
        to_index: usize,
        at: DateTime<Utc>,
    },
    Retreated {
        from_index: usize,
        to_index: usize,
        at: DateTime<Utc>,
    },
    AssessmentSubmitted {
        session_id: String,
        result: ScoreResult,
        at: DateTime<Utc>,
    },
    StepSnapshot {
        index: usize,
        total: usize,
        question_id: String,
        category: Category,
        selected: Option<usize>,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
