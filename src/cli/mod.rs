//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod init;
pub mod resolve;
pub mod watch;

pub use args::{Cli, Commands};
