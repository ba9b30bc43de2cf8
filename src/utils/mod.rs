//! Shared helpers.

pub mod hash;
mod plural;
pub mod url;

pub use plural::{plural_count, plural_s};
