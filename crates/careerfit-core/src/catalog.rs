//! Question catalog.
//!
//! A catalog is a fixed, ordered list of multiple-choice questions. Each
//! question's [`QuestionKind`] decides both its category and how it is
//! scored: Likert-style categories map the selected index onto a 0-100
//! scale, technical questions are graded against a known correct option.
//!
//! The built-in catalog is [`Catalog::esg_governance`]. Custom catalogs can
//! be loaded from TOML:
//!
//! ```toml
//! title = "My Assessment"
//!
//! [[questions]]
//! id = "tech1"
//! section = "Frameworks"
//! category = "technical"
//! correct_option = 2
//! prompt = "Which framework is commonly used for sustainability reporting?"
//! options = ["GAAP", "IFRS", "GRI Standards", "SOX"]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Scoring category of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Psychometric,
    Technical,
    Wiscar,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Psychometric, Category::Technical, Category::Wiscar];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Psychometric => "psychometric",
            Category::Technical => "technical",
            Category::Wiscar => "wiscar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category plus the data its scoring rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Five-point Likert item.
    Psychometric,
    /// Objectively graded item.
    Technical { correct_option: usize },
    /// Five-point Likert item on the WISCAR rubric.
    Wiscar,
}

impl QuestionKind {
    pub fn category(self) -> Category {
        match self {
            QuestionKind::Psychometric => Category::Psychometric,
            QuestionKind::Technical { .. } => Category::Technical,
            QuestionKind::Wiscar => Category::Wiscar,
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    pub id: String,
    /// Display heading (e.g. "Interest Assessment").
    #[serde(default)]
    pub section: String,
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// On-disk question shape. `correct_option` must be present exactly when
/// the category is technical.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawQuestion {
    id: String,
    #[serde(default)]
    section: String,
    prompt: String,
    options: Vec<String>,
    category: Category,
    correct_option: Option<usize>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = String;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let kind = match (raw.category, raw.correct_option) {
            (Category::Technical, Some(correct_option)) => QuestionKind::Technical { correct_option },
            (Category::Technical, None) => {
                return Err(format!("technical question '{}' has no correct_option", raw.id));
            }
            (category, Some(_)) => {
                return Err(format!(
                    "{category} question '{}' is scored on a likert scale and can't have a correct_option",
                    raw.id
                ));
            }
            (Category::Psychometric, None) => QuestionKind::Psychometric,
            (Category::Wiscar, None) => QuestionKind::Wiscar,
        };
        Ok(Self {
            id: raw.id,
            section: raw.section,
            prompt: raw.prompt,
            options: raw.options,
            kind,
        })
    }
}

impl Question {
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Correct option index, only defined for technical questions.
    pub fn correct_option(&self) -> Option<usize> {
        match self.kind {
            QuestionKind::Technical { correct_option } => Some(correct_option),
            QuestionKind::Psychometric | QuestionKind::Wiscar => None,
        }
    }
}

/// Validated, immutable, ordered question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    title: String,
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default = "default_title")]
    title: String,
    questions: Vec<Question>,
}

fn default_title() -> String {
    "Career Assessment".into()
}

impl Catalog {
    /// Build a catalog, rejecting definitions the scorer can't handle.
    ///
    /// # Errors
    /// Returns an error if the list is empty, ids repeat, a question has
    /// fewer than two options, a correct option is out of bounds, or any
    /// category has no questions.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateId(q.id.clone()));
            }
            if q.options.len() < 2 {
                return Err(CatalogError::TooFewOptions {
                    id: q.id.clone(),
                    len: q.options.len(),
                });
            }
            if let Some(correct) = q.correct_option() {
                if correct >= q.options.len() {
                    return Err(CatalogError::CorrectOptionOutOfRange {
                        id: q.id.clone(),
                        correct,
                        len: q.options.len(),
                    });
                }
            }
        }

        for category in Category::ALL {
            if !questions.iter().any(|q| q.category() == category) {
                return Err(CatalogError::MissingCategory(category.to_string()));
            }
        }

        Ok(Self {
            title: title.into(),
            questions,
        })
    }

    /// Parse and validate a TOML catalog.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::ParseFailed(e.to_string()))?;
        Self::new(file.title, file.questions)
    }

    /// Read a TOML catalog from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.category() == category)
    }

    /// The ESG Governance Analyst assessment.
    pub fn esg_governance() -> Self {
        let likert_agree = [
            "Strongly disagree",
            "Disagree",
            "Neutral",
            "Agree",
            "Strongly agree",
        ];

        let questions = vec![
            question(
                "psych1",
                "Interest Assessment",
                QuestionKind::Psychometric,
                "How interested are you in analyzing corporate sustainability practices?",
                &[
                    "Not at all interested",
                    "Slightly interested",
                    "Moderately interested",
                    "Very interested",
                    "Extremely interested",
                ],
            ),
            question(
                "psych2",
                "Personality Traits",
                QuestionKind::Psychometric,
                "I enjoy working with detailed financial and compliance data.",
                &likert_agree,
            ),
            question(
                "psych3",
                "Motivation Style",
                QuestionKind::Psychometric,
                "I am motivated by making a positive environmental and social impact through my work.",
                &likert_agree,
            ),
            question(
                "tech1",
                "ESG Knowledge",
                QuestionKind::Technical { correct_option: 2 },
                "What does ESG stand for in corporate governance?",
                &[
                    "Economic, Social, Governance",
                    "Environmental, Strategic, Governance",
                    "Environmental, Social, Governance",
                    "Ethical, Social, Global",
                ],
            ),
            question(
                "tech2",
                "Frameworks",
                QuestionKind::Technical { correct_option: 2 },
                "Which framework is commonly used for sustainability reporting?",
                &["GAAP", "IFRS", "GRI Standards", "SOX"],
            ),
            question(
                "tech3",
                "Data Analysis",
                QuestionKind::Technical { correct_option: 1 },
                "A company's carbon emissions increased by 15% while revenue grew by 8%. \
                 What does this suggest about their carbon intensity?",
                &[
                    "Carbon intensity improved",
                    "Carbon intensity worsened",
                    "Carbon intensity remained stable",
                    "Cannot determine from this data",
                ],
            ),
            question(
                "wiscar1",
                "Will (Persistence)",
                QuestionKind::Wiscar,
                "When faced with complex ESG analysis requiring weeks of research, I:",
                &[
                    "Often lose motivation",
                    "Sometimes struggle to maintain focus",
                    "Usually stay committed",
                    "Always see it through to completion",
                    "Thrive on long-term challenges",
                ],
            ),
            question(
                "wiscar2",
                "Cognitive Readiness",
                QuestionKind::Wiscar,
                "How comfortable are you with analyzing conflicting data sources to form conclusions?",
                &[
                    "Very uncomfortable",
                    "Somewhat uncomfortable",
                    "Neutral",
                    "Somewhat comfortable",
                    "Very comfortable",
                ],
            ),
            question(
                "wiscar3",
                "Real-World Alignment",
                QuestionKind::Wiscar,
                "How well do you think you'd handle presenting ESG findings to senior executives?",
                &[
                    "Would find it very challenging",
                    "Somewhat challenging",
                    "Moderately confident",
                    "Very confident",
                    "Extremely confident",
                ],
            ),
        ];

        Self {
            title: "ESG Governance Analyst Assessment".into(),
            questions,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::esg_governance()
    }
}

fn question(id: &str, section: &str, kind: QuestionKind, prompt: &str, options: &[&str]) -> Question {
    Question {
        id: id.into(),
        section: section.into(),
        prompt: prompt.into(),
        options: options.iter().map(|s| s.to_string()).collect(),
        kind,
    }
}
