use std::io::Write;

use careerfit_core::storage::clear_result;
use careerfit_core::{Config, Database, Report, ResultsView};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let view = ResultsView::open(&db, config.report.career_paths_shown)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    match view {
        ResultsView::Show(report) => write_report(&mut std::io::stdout().lock(), &report)?,
        ResultsView::RedirectToStart => {
            println!("No assessment results found. Start one with `careerfit take`.");
        }
    }
    Ok(())
}

pub fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    if clear_result(&db)? {
        println!("results cleared");
    } else {
        println!("no stored results");
    }
    Ok(())
}

/// Render the results page as text.
pub fn write_report(out: &mut dyn Write, report: &Report) -> std::io::Result<()> {
    let result = &report.result;
    writeln!(out, "{} ({})", report.headline, result.recommendation)?;
    writeln!(out, "Overall Confidence Score: {}%", result.overall)?;
    writeln!(out)?;

    for dim in &report.dimensions {
        writeln!(out, "{:<20} {:>3}%  {:?}", dim.title, dim.score, dim.band)?;
        writeln!(out, "  {}", dim.description)?;
    }

    writeln!(out)?;
    writeln!(out, "Personalized Insights")?;
    for dim in &report.dimensions {
        writeln!(out, "  - {}", dim.insight)?;
    }

    writeln!(out)?;
    writeln!(out, "Recommended Next Steps")?;
    for (i, step) in report.next_steps.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, step)?;
    }

    if !report.career_paths.is_empty() {
        writeln!(out)?;
        writeln!(out, "Related Career Paths")?;
        for path in &report.career_paths {
            writeln!(out, "  {}: {}", path.title, path.description)?;
        }
    }
    Ok(())
}
