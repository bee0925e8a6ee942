use clap::Args;
use careerfit_core::storage::save_result;
use careerfit_core::{score_with, Database, ResponseSet};

use super::load_catalog;

#[derive(Args)]
pub struct ScoreArgs {
    /// Answer as `<question-id>=<option>`, option numbered from 1 (repeatable)
    #[arg(long = "answer", short = 'a', value_parser = parse_answer)]
    answers: Vec<(String, usize)>,
    /// Answers as a JSON object of question id to 0-based option index
    #[arg(long, conflicts_with = "answers")]
    answers_json: Option<String>,
    /// Print the result without storing it
    #[arg(long)]
    dry_run: bool,
}

fn parse_answer(raw: &str) -> Result<(String, usize), String> {
    let (id, option) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <question-id>=<option>, got '{raw}'"))?;
    let option: usize = option
        .trim()
        .parse()
        .map_err(|_| format!("option in '{raw}' is not a number"))?;
    if option == 0 {
        return Err(format!("options are numbered from 1 in '{raw}'"));
    }
    Ok((id.trim().to_string(), option - 1))
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, catalog) = load_catalog()?;

    let responses: ResponseSet = match args.answers_json {
        Some(json) => serde_json::from_str(&json)?,
        None => args.answers.into_iter().collect(),
    };

    let result = score_with(&catalog, &responses, &config.scoring)?;
    if args.dry_run {
        tracing::debug!("dry run, result not stored");
    } else {
        let db = Database::open()?;
        save_result(&db, &result)?;
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_based_answers() {
        assert_eq!(parse_answer("tech1=3"), Ok(("tech1".to_string(), 2)));
        assert_eq!(parse_answer(" psych2 = 5 "), Ok(("psych2".to_string(), 4)));
    }

    #[test]
    fn rejects_malformed_answers() {
        assert!(parse_answer("tech1").is_err());
        assert!(parse_answer("tech1=x").is_err());
        assert!(parse_answer("tech1=0").is_err());
    }
}
