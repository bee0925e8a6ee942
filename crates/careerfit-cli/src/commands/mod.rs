pub mod completions;
pub mod config;
pub mod questions;
pub mod results;
pub mod score;
pub mod take;

use careerfit_core::{Catalog, Config};

/// Load the config and the catalog it points at.
pub fn load_catalog() -> Result<(Config, Catalog), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;
    Ok((config, catalog))
}
