//! docuconf - configuration schema and resolution engine for documentation sites.
//!
//! Reads a site config document and a sidebar document, validates both,
//! resolves every cross-reference and produces one immutable
//! [`ResolvedConfig`](resolve::ResolvedConfig), or every error at once.
//!
//! ```ignore
//! let sources = SiteSources::load(Path::new("docuconf.toml"), None)?;
//! let resolution = sources.resolve(&ResolveOptions::default())?;
//! println!("{}", serde_json::to_string_pretty(&resolution.config)?);
//! ```

#[macro_use]
pub mod logger;

pub mod cli;
pub mod config;
pub mod resolve;
pub mod utils;
