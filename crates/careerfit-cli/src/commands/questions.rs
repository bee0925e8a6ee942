use careerfit_core::Catalog;

use super::load_catalog;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, catalog) = load_catalog()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print!("{}", format_catalog(&catalog));
    }
    Ok(())
}

fn format_catalog(catalog: &Catalog) -> String {
    let mut out = format!("{} ({} questions)\n", catalog.title(), catalog.len());
    for (i, q) in catalog.iter().enumerate() {
        out.push_str(&format!("\n{}. [{}] {} ({})\n", i + 1, q.category(), q.prompt, q.id));
        for (j, option) in q.options.iter().enumerate() {
            out.push_str(&format!("   {}) {}\n", j + 1, option));
        }
    }
    out
}
