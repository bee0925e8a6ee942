//! Results view.
//!
//! Expands a stored [`ScoreResult`] into everything the summary page shows:
//! a headline for the recommendation, a band and an insight per dimension,
//! next steps, and related career paths. Opening the view with nothing stored
//! yields [`ResultsView::RedirectToStart`].

use serde::Serialize;

use crate::catalog::Category;
use crate::error::StorageError;
use crate::scoring::{Recommendation, ScoreResult};
use crate::storage::{load_result, ResultStore};

/// Per-dimension strength shown next to each sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    Strong,
    Moderate,
    Developing,
}

impl Band {
    pub fn for_score(score: u8) -> Self {
        if score >= 70 {
            Band::Strong
        } else if score >= 50 {
            Band::Moderate
        } else {
            Band::Developing
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionSummary {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    pub score: u8,
    pub band: Band,
    pub insight: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareerPath {
    pub title: &'static str,
    pub description: &'static str,
}

pub const CAREER_PATHS: [CareerPath; 5] = [
    CareerPath {
        title: "ESG Analyst",
        description: "Assess ESG risks and compliance for investment decisions",
    },
    CareerPath {
        title: "Sustainability Consultant",
        description: "Guide corporate sustainability strategies and implementation",
    },
    CareerPath {
        title: "Corporate Governance Officer",
        description: "Manage governance policies and regulatory compliance",
    },
    CareerPath {
        title: "Risk & Compliance Analyst",
        description: "Monitor regulatory adherence and risk assessment",
    },
    CareerPath {
        title: "Social Responsibility Coordinator",
        description: "Implement social impact and community initiatives",
    },
];

/// Everything the results page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub result: ScoreResult,
    pub headline: &'static str,
    pub dimensions: Vec<DimensionSummary>,
    pub next_steps: [&'static str; 4],
    pub career_paths: Vec<CareerPath>,
}

impl Report {
    /// Build the report, listing at most `career_paths_shown` career paths.
    pub fn new(result: ScoreResult, career_paths_shown: usize) -> Self {
        let dimensions = Category::ALL
            .into_iter()
            .map(|category| {
                let score = result.category(category);
                let (title, description) = dimension_labels(category);
                DimensionSummary {
                    category,
                    title,
                    description,
                    score,
                    band: Band::for_score(score),
                    insight: insight(category, score),
                }
            })
            .collect();

        Self {
            result,
            headline: headline(result.recommendation),
            dimensions,
            next_steps: next_steps(result.recommendation),
            career_paths: CAREER_PATHS.iter().take(career_paths_shown).copied().collect(),
        }
    }
}

/// What the results view should do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResultsView {
    Show(Report),
    RedirectToStart,
}

impl ResultsView {
    /// Read the stored result and decide what to render.
    ///
    /// # Errors
    /// Storage failures, including a corrupt slot.
    pub fn open(store: &dyn ResultStore, career_paths_shown: usize) -> Result<Self, StorageError> {
        match load_result(store)? {
            Some(result) => Ok(ResultsView::Show(Report::new(result, career_paths_shown))),
            None => {
                tracing::warn!("no stored assessment result; redirecting to start");
                Ok(ResultsView::RedirectToStart)
            }
        }
    }
}

pub fn headline(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Yes => "Highly Recommended",
        Recommendation::Maybe => "Conditionally Recommended",
        Recommendation::No => "Not Currently Recommended",
    }
}

fn dimension_labels(category: Category) -> (&'static str, &'static str) {
    match category {
        Category::Psychometric => (
            "Psychological Fit",
            "Interest, personality, and motivation alignment",
        ),
        Category::Technical => ("Technical Readiness", "ESG knowledge and analytical skills"),
        Category::Wiscar => (
            "WISCAR Score",
            "Will, Interest, Skill, Cognitive readiness, Ability to learn, Real-world alignment",
        ),
    }
}

fn insight(category: Category, score: u8) -> &'static str {
    match (category, score) {
        (Category::Psychometric, 80..) => {
            "Strong psychological fit for ESG governance work with high interest in sustainability and ethical decision-making."
        }
        (Category::Psychometric, 60..) => {
            "Good psychological alignment with some areas for development in ESG interest and motivation."
        }
        (Category::Psychometric, _) => {
            "Consider exploring ESG fundamentals to build stronger interest and motivation in sustainability practices."
        }
        (Category::Technical, 80..) => {
            "Excellent technical foundation with strong knowledge of ESG frameworks and analytical skills."
        }
        (Category::Technical, 60..) => {
            "Solid technical understanding with opportunities to deepen ESG-specific knowledge."
        }
        (Category::Technical, _) => {
            "Recommended to build foundational knowledge in ESG frameworks, sustainability reporting, and governance principles."
        }
        (Category::Wiscar, 80..) => {
            "High readiness with strong persistence, learning ability, and real-world job alignment."
        }
        (Category::Wiscar, 60..) => {
            "Good overall readiness with some areas to strengthen for optimal performance."
        }
        (Category::Wiscar, _) => {
            "Focus on building persistence, analytical thinking, and familiarity with ESG analyst responsibilities."
        }
    }
}

fn next_steps(recommendation: Recommendation) -> [&'static str; 4] {
    match recommendation {
        Recommendation::Yes => [
            "Apply for entry-level ESG Analyst positions",
            "Pursue GRI Standards certification",
            "Join ESG professional networks and communities",
            "Start building a portfolio of ESG analysis projects",
        ],
        Recommendation::Maybe => [
            "Complete ESG fundamentals course",
            "Gain experience through internships or volunteer projects",
            "Develop stronger data analysis skills",
            "Retake assessment after 6 months of development",
        ],
        Recommendation::No => [
            "Explore foundational courses in sustainability and governance",
            "Consider alternative roles like Data Analyst or Compliance Assistant",
            "Build analytical and research skills",
            "Reassess career interests and motivations",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{save_result, MemoryStore};

    fn result(psychometric: u8, technical: u8, wiscar: u8, overall: u8) -> ScoreResult {
        ScoreResult {
            psychometric,
            technical,
            wiscar,
            overall,
            recommendation: crate::scoring::Thresholds::default().classify(overall),
        }
    }

    #[test]
    fn band_cutoffs() {
        assert_eq!(Band::for_score(70), Band::Strong);
        assert_eq!(Band::for_score(69), Band::Moderate);
        assert_eq!(Band::for_score(50), Band::Moderate);
        assert_eq!(Band::for_score(49), Band::Developing);
    }

    #[test]
    fn insights_follow_80_60_cutoffs() {
        let report = Report::new(result(80, 60, 59, 66), 3);
        assert!(report.dimensions[0].insight.starts_with("Strong psychological fit"));
        assert!(report.dimensions[1].insight.starts_with("Solid technical understanding"));
        assert!(report.dimensions[2].insight.starts_with("Focus on building persistence"));
    }

    #[test]
    fn headline_and_steps_follow_recommendation() {
        let report = Report::new(result(67, 67, 47, 61), 3);
        assert_eq!(report.headline, "Conditionally Recommended");
        assert_eq!(report.next_steps[3], "Retake assessment after 6 months of development");

        let report = Report::new(result(100, 100, 100, 100), 3);
        assert_eq!(report.headline, "Highly Recommended");
        assert_eq!(report.next_steps[0], "Apply for entry-level ESG Analyst positions");
    }

    #[test]
    fn career_paths_are_truncated() {
        assert_eq!(Report::new(result(0, 0, 0, 0), 3).career_paths.len(), 3);
        assert_eq!(Report::new(result(0, 0, 0, 0), 10).career_paths.len(), 5);
        assert!(Report::new(result(0, 0, 0, 0), 0).career_paths.is_empty());
    }

    #[test]
    fn open_without_result_redirects() {
        let store = MemoryStore::new();
        assert_eq!(
            ResultsView::open(&store, 3).unwrap(),
            ResultsView::RedirectToStart
        );
    }

    #[test]
    fn open_with_result_shows_report() {
        let store = MemoryStore::new();
        save_result(&store, &result(67, 67, 47, 61)).unwrap();
        match ResultsView::open(&store, 3).unwrap() {
            ResultsView::Show(report) => {
                assert_eq!(report.result.overall, 61);
                assert_eq!(report.dimensions[2].band, Band::Developing);
            }
            ResultsView::RedirectToStart => panic!("expected a report"),
        }
    }
}
