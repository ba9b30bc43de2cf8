//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Error types and the diagnostics accumulator  |
//! | `field`  | Dot-notation field paths                     |
//! | `handle` | Swappable resolved-config handle (reload)    |

mod error;
mod field;
pub mod handle;

pub use error::{ConfigDiagnostics, ConfigError, Diagnostic, ErrorCode};
pub use field::FieldPath;
pub use handle::{ConfigHandle, ReloadOutcome};
