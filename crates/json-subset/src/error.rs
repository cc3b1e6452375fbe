use thiserror::Error;

use crate::path::Path;

/// A check that could not produce a verdict.
///
/// Mismatches are never errors; they are reported in
/// [`Outcome`](crate::Outcome). This only covers malformed input trees when
/// the caller asked for them to be fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainsError {
    #[error("unsupported construct `{construct}` at {path}")]
    Unsupported { construct: &'static str, path: Path },
}
