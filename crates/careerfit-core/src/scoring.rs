//! Score aggregation.
//!
//! Turns a complete [`ResponseSet`] into a [`ScoreResult`]. The computation
//! is a pure function of the catalog, the responses and a [`ScoringPolicy`]:
//!
//! ```text
//! per question   likert    = selected_index * 20        (clamped to 0..=100)
//!                technical = 100 if correct else 0
//! per category   mean of per-question values            (unrounded)
//! overall        psych * 0.30 + tech * 0.40 + wiscar * 0.30
//!                computed on the unrounded means
//! output         every score rounded half away from zero
//! ```
//!
//! | Overall   | Recommendation |
//! |-----------|----------------|
//! | >= 70     | Yes            |
//! | 50 ..= 69 | Maybe          |
//! | < 50      | No             |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Category, Question, QuestionKind};
use crate::error::AssessmentError;

/// Points per step on a five-point Likert scale (index 4 -> 80).
pub const LIKERT_STEP: f64 = 20.0;

/// Selected option index per question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<String, usize>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `question_id`.
    pub fn insert(&mut self, question_id: impl Into<String>, option_index: usize) -> Option<usize> {
        self.0.insert(question_id.into(), option_index)
    }

    pub fn get(&self, question_id: &str) -> Option<usize> {
        self.0.get(question_id).copied()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn remove(&mut self, question_id: &str) -> Option<usize> {
        self.0.remove(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Catalog question ids with no answer, in catalog order.
    pub fn missing(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .iter()
            .filter(|q| !self.contains(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, usize)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Overall recommendation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recommendation::Yes => "Yes",
            Recommendation::Maybe => "Maybe",
            Recommendation::No => "No",
        })
    }
}

/// Final assessment outcome. This is the record persisted for the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub psychometric: u8,
    pub technical: u8,
    pub wiscar: u8,
    pub overall: u8,
    pub recommendation: Recommendation,
}

impl ScoreResult {
    /// Sub-score for a single category.
    pub fn category(&self, category: Category) -> u8 {
        match category {
            Category::Psychometric => self.psychometric,
            Category::Technical => self.technical,
            Category::Wiscar => self.wiscar,
        }
    }
}

/// Category weights for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default = "default_psychometric_weight")]
    pub psychometric: f64,
    #[serde(default = "default_technical_weight")]
    pub technical: f64,
    #[serde(default = "default_wiscar_weight")]
    pub wiscar: f64,
}

fn default_psychometric_weight() -> f64 {
    0.30
}
fn default_technical_weight() -> f64 {
    0.40
}
fn default_wiscar_weight() -> f64 {
    0.30
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            psychometric: default_psychometric_weight(),
            technical: default_technical_weight(),
            wiscar: default_wiscar_weight(),
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.psychometric + self.technical + self.wiscar
    }
}

/// Lower bounds (inclusive) of the `Yes` and `Maybe` bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_yes")]
    pub yes: u8,
    #[serde(default = "default_maybe")]
    pub maybe: u8,
}

fn default_yes() -> u8 {
    70
}
fn default_maybe() -> u8 {
    50
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            yes: default_yes(),
            maybe: default_maybe(),
        }
    }
}

impl Thresholds {
    pub fn classify(&self, overall: u8) -> Recommendation {
        if overall >= self.yes {
            Recommendation::Yes
        } else if overall >= self.maybe {
            Recommendation::Maybe
        } else {
            Recommendation::No
        }
    }
}

/// Weights and thresholds applied by [`score_with`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Unrounded per-category means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryMeans {
    pub psychometric: f64,
    pub technical: f64,
    pub wiscar: f64,
}

impl CategoryMeans {
    /// Weighted overall score before rounding.
    pub fn weighted(&self, weights: &Weights) -> f64 {
        self.psychometric * weights.psychometric
            + self.technical * weights.technical
            + self.wiscar * weights.wiscar
    }
}

/// Per-question value on the 0..=100 scale.
pub fn normalized_value(question: &Question, selected: usize) -> f64 {
    let value = match question.kind {
        QuestionKind::Psychometric | QuestionKind::Wiscar => selected as f64 * LIKERT_STEP,
        QuestionKind::Technical { correct_option } => {
            if selected == correct_option {
                100.0
            } else {
                0.0
            }
        }
    };
    value.clamp(0.0, 100.0)
}

/// Compute the unrounded category means.
///
/// # Errors
/// Returns [`AssessmentError::IncompleteResponseSet`] if any catalog question
/// is unanswered, [`AssessmentError::UnknownQuestion`] or
/// [`AssessmentError::OptionOutOfRange`] if a response doesn't fit the
/// catalog, and [`AssessmentError::EmptyCategory`] if a category has no
/// questions.
pub fn category_means(
    catalog: &Catalog,
    responses: &ResponseSet,
) -> Result<CategoryMeans, AssessmentError> {
    validate(catalog, responses)?;

    Ok(CategoryMeans {
        psychometric: category_mean(catalog, responses, Category::Psychometric)?,
        technical: category_mean(catalog, responses, Category::Technical)?,
        wiscar: category_mean(catalog, responses, Category::Wiscar)?,
    })
}

/// Score with the default 30/40/30 weights and 70/50 thresholds.
pub fn score(catalog: &Catalog, responses: &ResponseSet) -> Result<ScoreResult, AssessmentError> {
    score_with(catalog, responses, &ScoringPolicy::default())
}

/// Score with an explicit policy.
pub fn score_with(
    catalog: &Catalog,
    responses: &ResponseSet,
    policy: &ScoringPolicy,
) -> Result<ScoreResult, AssessmentError> {
    let means = category_means(catalog, responses)?;
    let overall = to_percent(means.weighted(&policy.weights));

    Ok(ScoreResult {
        psychometric: to_percent(means.psychometric),
        technical: to_percent(means.technical),
        wiscar: to_percent(means.wiscar),
        overall,
        recommendation: policy.thresholds.classify(overall),
    })
}

fn validate(catalog: &Catalog, responses: &ResponseSet) -> Result<(), AssessmentError> {
    for (id, index) in responses.iter() {
        let question = catalog
            .find(id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(id.to_string()))?;
        if index >= question.options.len() {
            return Err(AssessmentError::OptionOutOfRange {
                question_id: id.to_string(),
                index,
                len: question.options.len(),
            });
        }
    }

    let missing = responses.missing(catalog);
    if !missing.is_empty() {
        return Err(AssessmentError::IncompleteResponseSet { missing });
    }
    Ok(())
}

fn category_mean(
    catalog: &Catalog,
    responses: &ResponseSet,
    category: Category,
) -> Result<f64, AssessmentError> {
    let mut total = 0.0;
    let mut count = 0usize;
    for question in catalog.by_category(category) {
        let selected = responses
            .get(&question.id)
            .ok_or_else(|| AssessmentError::IncompleteResponseSet {
                missing: vec![question.id.clone()],
            })?;
        total += normalized_value(question, selected);
        count += 1;
    }

    if count == 0 {
        return Err(AssessmentError::EmptyCategory(category.to_string()));
    }
    Ok(total / count as f64)
}

/// Round half away from zero onto 0..=100.
fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
