//! Integration tests for the full assessment flow: session -> scoring -> storage -> results view.

use careerfit_core::storage::{load_result, RESULT_KEY};
use careerfit_core::{
    score, AssessmentError, AssessmentSession, Catalog, Category, CoreError, Database, Event,
    MemoryStore, Recommendation, ResponseSet, ResultStore, ResultsView, SessionState,
};
use indoc::indoc;

/// Answers in catalog order for the built-in catalog.
fn esg_answers(psych: [usize; 3], tech: [usize; 3], wiscar: [usize; 3]) -> ResponseSet {
    let ids = [
        "psych1", "psych2", "psych3", "tech1", "tech2", "tech3", "wiscar1", "wiscar2", "wiscar3",
    ];
    ids.into_iter()
        .zip(psych.into_iter().chain(tech).chain(wiscar))
        .collect()
}

/// Drive a session through the catalog with the given answers.
fn run_session(catalog: &Catalog, store: &dyn ResultStore, responses: &ResponseSet) -> Vec<Event> {
    let mut session = AssessmentSession::new(catalog);
    let mut events = Vec::new();
    while session.state() == SessionState::InProgress {
        let id = session.current_question().id.clone();
        let index = responses.get(&id).unwrap();
        events.push(session.record_response(&id, index).unwrap());
        events.push(session.advance(store).unwrap().unwrap());
    }
    events
}

#[test]
fn worked_example_through_sqlite() {
    let catalog = Catalog::esg_governance();
    let db = Database::open_memory().unwrap();
    let responses = esg_answers([3, 4, 3], [2, 2, 0], [2, 3, 2]);

    let events = run_session(&catalog, &db, &responses);
    let submitted: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::AssessmentSubmitted { .. }))
        .collect();
    assert_eq!(submitted.len(), 1);

    let stored = load_result(&db).unwrap().unwrap();
    assert_eq!(stored.psychometric, 67);
    assert_eq!(stored.technical, 67);
    assert_eq!(stored.wiscar, 47);
    assert_eq!(stored.overall, 61);
    assert_eq!(stored.recommendation, Recommendation::Maybe);

    let raw: serde_json::Value =
        serde_json::from_str(&db.kv_get(RESULT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({
            "psychometric": 67,
            "technical": 67,
            "wiscar": 47,
            "overall": 61,
            "recommendation": "Maybe"
        })
    );
}

#[test]
fn overall_band_boundaries() {
    let catalog = Catalog::esg_governance();
    let cases = [
        // all technical correct, likert sum 15 -> exactly 70
        (esg_answers([4, 4, 4], [2, 2, 1], [1, 1, 1]), 70, Recommendation::Yes),
        // two technical correct, likert sum 21 -> 68.67
        (esg_answers([4, 4, 4], [2, 2, 0], [3, 3, 3]), 69, Recommendation::Maybe),
        // all technical correct, likert sum 5 -> exactly 50
        (esg_answers([1, 1, 1], [2, 2, 1], [1, 1, 0]), 50, Recommendation::Maybe),
        // one technical correct, likert sum 18 -> 49.33
        (esg_answers([4, 4, 4], [2, 0, 0], [2, 2, 2]), 49, Recommendation::No),
    ];

    for (responses, overall, recommendation) in cases {
        let result = score(&catalog, &responses).unwrap();
        assert_eq!(result.overall, overall, "{responses:?}");
        assert_eq!(result.recommendation, recommendation, "{responses:?}");
    }
}

#[test]
fn likert_extremes() {
    let catalog = Catalog::esg_governance();

    let top = score(&catalog, &esg_answers([4, 4, 4], [0, 0, 0], [4, 4, 4])).unwrap();
    assert_eq!(top.psychometric, 80);
    assert_eq!(top.wiscar, 80);
    // likert answers alone never clear the Yes bar
    assert_eq!(top.technical, 0);
    assert_eq!(top.overall, 48);
    assert_eq!(top.recommendation, Recommendation::No);

    let bottom = score(&catalog, &esg_answers([0, 0, 0], [0, 0, 0], [0, 0, 0])).unwrap();
    assert_eq!(bottom.psychometric, 0);
    assert_eq!(bottom.wiscar, 0);
}

#[test]
fn technical_extremes() {
    let catalog = Catalog::esg_governance();

    let correct = score(&catalog, &esg_answers([0, 0, 0], [2, 2, 1], [0, 0, 0])).unwrap();
    assert_eq!(correct.technical, 100);

    let wrong = score(&catalog, &esg_answers([0, 0, 0], [0, 3, 3], [0, 0, 0])).unwrap();
    assert_eq!(wrong.technical, 0);
    assert_eq!(wrong.overall, 0);
    assert_eq!(wrong.recommendation, Recommendation::No);
}

#[test]
fn incomplete_set_reports_every_missing_id() {
    let catalog = Catalog::esg_governance();
    let mut responses = esg_answers([3, 4, 3], [2, 2, 0], [2, 3, 2]);
    responses.remove("psych3");
    responses.remove("wiscar1");

    assert_eq!(
        score(&catalog, &responses),
        Err(AssessmentError::IncompleteResponseSet {
            missing: vec!["psych3".into(), "wiscar1".into()]
        })
    );
}

#[test]
fn overall_uses_unrounded_means() {
    // technical mean 28.571 rounds to 29; weighting the rounded sub-scores
    // would give 11.6 -> 12, the unrounded means give 11.43 -> 11
    let catalog = Catalog::from_toml_str(indoc! {r#"
        [[questions]]
        id = "p"
        category = "psychometric"
        prompt = "p"
        options = ["0", "1", "2", "3", "4"]

        [[questions]]
        id = "w"
        category = "wiscar"
        prompt = "w"
        options = ["0", "1", "2", "3", "4"]

        [[questions]]
        id = "t1"
        category = "technical"
        correct_option = 0
        prompt = "t1"
        options = ["a", "b"]

        [[questions]]
        id = "t2"
        category = "technical"
        correct_option = 0
        prompt = "t2"
        options = ["a", "b"]

        [[questions]]
        id = "t3"
        category = "technical"
        correct_option = 0
        prompt = "t3"
        options = ["a", "b"]

        [[questions]]
        id = "t4"
        category = "technical"
        correct_option = 0
        prompt = "t4"
        options = ["a", "b"]

        [[questions]]
        id = "t5"
        category = "technical"
        correct_option = 0
        prompt = "t5"
        options = ["a", "b"]

        [[questions]]
        id = "t6"
        category = "technical"
        correct_option = 0
        prompt = "t6"
        options = ["a", "b"]

        [[questions]]
        id = "t7"
        category = "technical"
        correct_option = 0
        prompt = "t7"
        options = ["a", "b"]
    "#})
    .unwrap();

    let responses: ResponseSet = [
        ("p", 0),
        ("w", 0),
        ("t1", 0),
        ("t2", 0),
        ("t3", 1),
        ("t4", 1),
        ("t5", 1),
        ("t6", 1),
        ("t7", 1),
    ]
    .into_iter()
    .collect();

    let result = score(&catalog, &responses).unwrap();
    assert_eq!(result.technical, 29);
    assert_eq!(result.overall, 11);
}

#[test]
fn failed_finalize_leaves_previous_result_untouched() {
    let catalog = Catalog::esg_governance();
    let store = MemoryStore::new();

    run_session(
        &catalog,
        &store,
        &esg_answers([4, 4, 4], [2, 2, 1], [4, 4, 4]),
    );
    let first = load_result(&store).unwrap().unwrap();
    assert_eq!(first.overall, 88);

    // a second session that never answers the last question can't overwrite it
    let mut session = AssessmentSession::new(&catalog);
    for _ in 0..catalog.len() - 1 {
        session.answer_current(0).unwrap();
        session.advance(&store).unwrap();
    }
    assert!(session.advance(&store).unwrap().is_none());
    assert_eq!(load_result(&store).unwrap(), Some(first));
}

#[test]
fn results_view_redirects_until_submission() {
    let catalog = Catalog::esg_governance();
    let db = Database::open_memory().unwrap();

    assert_eq!(
        ResultsView::open(&db, 3).unwrap(),
        ResultsView::RedirectToStart
    );

    run_session(&catalog, &db, &esg_answers([3, 4, 3], [2, 2, 0], [2, 3, 2]));

    match ResultsView::open(&db, 3).unwrap() {
        ResultsView::Show(report) => {
            assert_eq!(report.headline, "Conditionally Recommended");
            let technical = report
                .dimensions
                .iter()
                .find(|d| d.category == Category::Technical)
                .unwrap();
            assert_eq!(technical.score, 67);
        }
        ResultsView::RedirectToStart => panic!("expected stored result"),
    }
}

#[test]
fn submission_errors_are_core_errors() {
    let catalog = Catalog::esg_governance();
    let store = MemoryStore::new();
    let mut session = AssessmentSession::new(&catalog);
    let err = session.record_response("psych1", 99).unwrap_err();
    let core: CoreError = err.into();
    assert!(core.to_string().contains("out of range"));
    assert!(session.advance(&store).unwrap().is_none());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn valid_responses() -> impl Strategy<Value = ResponseSet> {
        let catalog = Catalog::esg_governance();
        let per_question: Vec<_> = catalog
            .iter()
            .map(|q| (Just(q.id.clone()), 0..q.options.len()))
            .collect();
        per_question.prop_map(|pairs| pairs.into_iter().collect::<ResponseSet>())
    }

    proptest! {
        #[test]
        fn scores_stay_in_range_and_match_band(responses in valid_responses()) {
            let catalog = Catalog::esg_governance();
            let result = score(&catalog, &responses).unwrap();
            for value in [result.psychometric, result.technical, result.wiscar, result.overall] {
                prop_assert!(value <= 100);
            }
            let expected = if result.overall >= 70 {
                Recommendation::Yes
            } else if result.overall >= 50 {
                Recommendation::Maybe
            } else {
                Recommendation::No
            };
            prop_assert_eq!(result.recommendation, expected);
        }

        #[test]
        fn scoring_is_deterministic(responses in valid_responses()) {
            let catalog = Catalog::esg_governance();
            prop_assert_eq!(score(&catalog, &responses), score(&catalog, &responses));
        }

        #[test]
        fn session_matches_direct_scoring(responses in valid_responses()) {
            let catalog = Catalog::esg_governance();
            let store = MemoryStore::new();
            run_session(&catalog, &store, &responses);
            prop_assert_eq!(load_result(&store).unwrap(), Some(score(&catalog, &responses).unwrap()));
        }
    }
}
