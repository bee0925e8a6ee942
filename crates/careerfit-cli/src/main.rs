use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "careerfit", version, about = "Career self-assessment CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take(commands::take::TakeArgs),
    /// Score a full set of answers without the interactive flow
    Score(commands::score::ScoreArgs),
    /// Show the stored results
    Results {
        /// Print JSON instead of the formatted report
        #[arg(long)]
        json: bool,
    },
    /// List the question catalog
    Questions {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Delete the stored results
    Reset,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CAREERFIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Take(args) => commands::take::run(args),
        Commands::Score(args) => commands::score::run(args),
        Commands::Results { json } => commands::results::run(json),
        Commands::Questions { json } => commands::questions::run(json),
        Commands::Reset => commands::results::reset(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
