//! # careerfit Core Library
//!
//! Core logic for the careerfit self-assessment quiz: a fixed catalog of
//! multiple-choice questions is walked one step at a time, the answers are
//! scored into three sub-scores plus an overall recommendation, and the
//! result is stored for the results view. The CLI is a thin presentation
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: Static, validated question list. Each question's kind
//!   decides its category and scoring rule
//! - **Session**: Response collector state machine with gated navigation;
//!   finalizes exactly once
//! - **Scoring**: Pure aggregation of a complete response set
//! - **Storage**: Key-value port for the single result slot (SQLite or
//!   in-memory) and TOML configuration
//! - **Report**: Results view built from the stored result
//!
//! ## Key Components
//!
//! - [`Catalog`]: Question catalog
//! - [`AssessmentSession`]: Response collector
//! - [`score`]: Score aggregator
//! - [`ResultStore`]: Storage port
//! - [`ResultsView`]: Results view / redirect decision

pub mod catalog;
pub mod error;
pub mod events;
pub mod report;
pub mod scoring;
pub mod session;
pub mod storage;

pub use catalog::{Catalog, Category, Question, QuestionKind};
pub use error::{AssessmentError, CatalogError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use report::{Band, Report, ResultsView};
pub use scoring::{
    score, score_with, Recommendation, ResponseSet, ScoreResult, ScoringPolicy, Thresholds,
    Weights,
};
pub use session::{AssessmentSession, SessionState, StepView};
pub use storage::{Config, Database, MemoryStore, ResultStore};
