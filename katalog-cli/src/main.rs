//! Katalog CLI - Production pipeline for the book recommendation catalog

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use katalog_core::assemble::RESOLUTIONS;
use katalog_core::tools::{DryRun, SystemRunner, ToolRunner, Toolchain};
use katalog_core::{EditionContext, PublisherCase};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "katalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root holding `issues/` and `assets/`
    #[arg(long, global = true, env = "KATALOG_ROOT", default_value = ".")]
    root: PathBuf,

    /// Issue to work on, e.g. 2021_02
    #[arg(short, long, global = true, env = "KATALOG_ISSUE")]
    issue: Option<String>,

    /// How publisher names are grouped (exact, lowercase, casefold)
    #[arg(
        long,
        global = true,
        env = "KATALOG_PUBLISHER_CASE",
        default_value = "casefold"
    )]
    publisher_case: PublisherCase,

    /// Print external tool calls instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert raw category spreadsheets to JSON
    Csv2json,

    /// Report duplicate ISBNs and improper age ratings
    Check,

    /// Block duplicates and sort the data for layout
    Process,

    /// Generate one layout partial per category
    Partials,

    /// Assemble the base document from the main template and all partials
    Base,

    /// Render the edited layout document to PDF
    Build,

    /// Write optimized copies of the final PDF
    Optimize {
        /// Image resolutions in dpi (comma-separated)
        #[arg(short, long, value_delimiter = ',', default_values_t = RESOLUTIONS)]
        resolutions: Vec<u32>,
    },

    /// Compare the number of books in data and layout
    Verify,

    /// Write the per-publisher summary of all placed books
    Summary,

    /// Draft one mail per publisher
    Mails,

    /// Extract the laid out text of every book
    Extract,
}

/// Everything a command needs to run against one issue
pub struct Session {
    pub edition: EditionContext,
    pub toolchain: Toolchain,
    pub runner: Box<dyn ToolRunner>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "katalog_cli=debug,katalog_core=debug"
    } else {
        "katalog_cli=info,katalog_core=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let issue = cli
        .issue
        .context("No issue selected, pass --issue or set KATALOG_ISSUE")?;
    let edition = EditionContext::new(&cli.root, &issue)
        .with_context(|| format!("Invalid issue '{}'", issue))?
        .with_publisher_case(cli.publisher_case);

    let runner: Box<dyn ToolRunner> = if cli.dry_run {
        Box::new(DryRun::new())
    } else {
        Box::new(SystemRunner)
    };
    let session = Session {
        toolchain: Toolchain::new(&cli.root),
        edition,
        runner,
    };

    match cli.command {
        Commands::Csv2json => commands::csv2json(&session),
        Commands::Check => commands::check(&session),
        Commands::Process => commands::process(&session),
        Commands::Partials => commands::partials(&session),
        Commands::Base => commands::base(&session),
        Commands::Build => commands::build(&session),
        Commands::Optimize { resolutions } => commands::optimize(&session, &resolutions),
        Commands::Verify => commands::verify(&session),
        Commands::Summary => commands::summary(&session),
        Commands::Mails => commands::mails(&session),
        Commands::Extract => commands::extract(&session),
    }
}
