//! Command-line interface definitions.

use crate::config::DEFAULT_CONFIG_NAME;
use crate::resolve::ResolveOptions;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Docs-site config checker and resolver
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CONFIG_NAME, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Sidebar document path (default: preset `sidebarPath`, then sidebars.toml)
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub sidebars: Option<PathBuf>,

    /// Treat unknown config keys as errors
    #[arg(long, global = true)]
    pub strict: bool,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a starter config and sidebar document
    #[command(visible_alias = "i")]
    Init {
        /// Site directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the starter config instead of writing files
        #[arg(long)]
        dry: bool,
    },

    /// Validate the config and report every error
    #[command(visible_alias = "c")]
    Check,

    /// Print the resolved config as JSON
    #[command(visible_alias = "r")]
    Resolve {
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Re-resolve whenever the config or sidebar document changes
    #[command(visible_alias = "w")]
    Watch,
}

impl Cli {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::default().strict(self.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::UnknownKeys;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["docuconf", "check", "--strict", "-C", "site.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert_eq!(cli.resolve_options().unknown_keys, Some(UnknownKeys::Strict));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["docuconf", "resolve"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_NAME));
        assert_eq!(cli.resolve_options().unknown_keys, None);
        assert!(matches!(cli.command, Commands::Resolve { compact: false, output: None }));
    }

    #[test]
    fn test_init_with_name() {
        let cli = Cli::try_parse_from(["docuconf", "init", "my-docs", "--dry"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { name: Some(_), dry: true }));
    }
}
