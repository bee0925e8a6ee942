//! Interactive assessment.
//!
//! Reads one command per line:
//! - `1`..`N`: select that option for the current question
//! - `n` or empty line: next question (submits on the last one)
//! - `b`: previous question
//! - `q`: quit without submitting

use std::io::{BufRead, Write};

use clap::Args;
use careerfit_core::{
    AssessmentSession, Catalog, Database, Event, Report, ResultStore, ScoreResult,
    ScoringPolicy, StepView,
};

use super::load_catalog;
use super::results::write_report;

#[derive(Args)]
pub struct TakeArgs {
    /// Emit session events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: TakeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, catalog) = load_catalog()?;
    let db = Database::open()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = run_quiz(
        &catalog,
        config.scoring,
        &db,
        &mut stdin.lock(),
        &mut out,
        args.json,
    )?;

    match outcome {
        Some(result) if !args.json => {
            writeln!(out)?;
            write_report(&mut out, &Report::new(result, config.report.career_paths_shown))?;
        }
        Some(_) => {}
        None => eprintln!("assessment not submitted"),
    }
    Ok(())
}

enum Input {
    Select(usize),
    Next,
    Back,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" | "n" | "next" => Input::Next,
        "b" | "back" => Input::Back,
        "q" | "quit" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Select(n - 1),
            _ => Input::Unknown,
        },
    }
}

/// Drive a session from line input. Returns the result if it was submitted.
pub fn run_quiz(
    catalog: &Catalog,
    policy: ScoringPolicy,
    store: &dyn ResultStore,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    json: bool,
) -> Result<Option<ScoreResult>, Box<dyn std::error::Error>> {
    let mut session = AssessmentSession::with_policy(catalog, policy);
    if !json {
        writeln!(out, "{}", catalog.title())?;
    }

    let mut line = String::new();
    loop {
        if json {
            emit(out, &session.snapshot())?;
        } else {
            write_step(out, &session.view())?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!(session_id = session.id(), "input closed before submission");
            return Ok(None);
        }

        match parse_input(&line) {
            Input::Select(index) => match session.answer_current(index) {
                Ok(event) => {
                    if json {
                        emit(out, &event)?;
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            Input::Next => match session.advance(store)? {
                Some(event) => {
                    if json {
                        emit(out, &event)?;
                    }
                    if let Event::AssessmentSubmitted { result, .. } = event {
                        return Ok(Some(result));
                    }
                }
                None => {
                    if !json {
                        writeln!(out, "Choose an option before continuing.")?;
                    }
                }
            },
            Input::Back => match session.retreat() {
                Some(event) => {
                    if json {
                        emit(out, &event)?;
                    }
                }
                None => {
                    if !json {
                        writeln!(out, "Already at the first question.")?;
                    }
                }
            },
            Input::Quit => {
                tracing::debug!(session_id = session.id(), "quit before submission");
                return Ok(None);
            }
            Input::Unknown => {
                if !json {
                    writeln!(out, "Enter an option number, n (next), b (back) or q (quit).")?;
                }
            }
        }
    }
}

fn emit(out: &mut dyn Write, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "{}", serde_json::to_string(event)?)?;
    Ok(())
}

fn write_step(out: &mut dyn Write, view: &StepView<'_>) -> std::io::Result<()> {
    let q = view.question;
    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {} ({:.0}%)",
        view.index + 1,
        view.total,
        view.progress_pct
    )?;
    if !q.section.is_empty() {
        writeln!(out, "{}", q.section)?;
    }
    writeln!(out, "{}", q.prompt)?;
    for (i, option) in q.options.iter().enumerate() {
        let marker = if view.selected == Some(i) { "*" } else { " " };
        writeln!(out, " {marker} {}) {}", i + 1, option)?;
    }
    let next = if view.is_last { "submit" } else { "next" };
    writeln!(out, "> [1-{}] select, n {next}, b back, q quit", q.options.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerfit_core::storage::load_result;
    use careerfit_core::{MemoryStore, Recommendation};
    use std::io::Cursor;

    fn drive(script: &str, json: bool) -> (Option<ScoreResult>, String, MemoryStore) {
        let catalog = Catalog::esg_governance();
        let store = MemoryStore::new();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = run_quiz(
            &catalog,
            ScoringPolicy::default(),
            &store,
            &mut input,
            &mut out,
            json,
        )
        .unwrap();
        (result, String::from_utf8(out).unwrap(), store)
    }

    // worked example, 1-based: psych 4,5,4 tech 3,3,1 wiscar 3,4,3
    const WORKED: &str = "4\nn\n5\nn\n4\nn\n3\nn\n3\nn\n1\nn\n3\nn\n4\nn\n3\nn\n";

    #[test]
    fn full_run_submits_and_stores() {
        let (result, text, store) = drive(WORKED, false);
        let result = result.unwrap();
        assert_eq!(result.overall, 61);
        assert_eq!(result.recommendation, Recommendation::Maybe);
        assert_eq!(load_result(&store).unwrap(), Some(result));
        assert!(text.contains("Question 9 of 9 (100%)"));
        assert!(text.contains("n submit"));
    }

    #[test]
    fn next_without_answer_is_refused() {
        let (result, text, store) = drive("n\nb\nq\n", false);
        assert!(result.is_none());
        assert!(text.contains("Choose an option before continuing."));
        assert!(text.contains("Already at the first question."));
        assert!(load_result(&store).unwrap().is_none());
    }

    #[test]
    fn out_of_range_option_is_reported() {
        let (_, text, _) = drive("9\nq\n", false);
        assert!(text.contains("out of range"));
    }

    #[test]
    fn eof_abandons_session() {
        let (result, _, store) = drive("1\nn\n", false);
        assert!(result.is_none());
        assert!(load_result(&store).unwrap().is_none());
    }

    #[test]
    fn json_mode_emits_events() {
        let (result, text, _) = drive(WORKED, true);
        assert!(result.is_some());
        let events: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events[0]["type"], "StepSnapshot");
        let last = events.last().unwrap();
        assert_eq!(last["type"], "AssessmentSubmitted");
        assert_eq!(last["result"]["overall"], 61);
    }
}
