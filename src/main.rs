//! docuconf - check and resolve documentation site configs.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use docuconf::cli::{self, Cli, Commands};
use docuconf::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init { name, dry } => cli::init::new_site(name.as_deref(), *dry),
        Commands::Check => cli::check::check_site(&cli),
        Commands::Resolve { compact, output } => {
            cli::resolve::resolve_site(&cli, *compact, output.as_deref())
        }
        Commands::Watch => cli::watch::watch_site(&cli),
    }
}
