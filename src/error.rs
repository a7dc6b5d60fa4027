use thiserror::Error;

/// Failures of the belt domain. Everything else is reported through `anyhow`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BeltError {
    #[error("Season {0} is not available.")]
    InvalidSeason(i32),

    #[error("malformed game: {0}")]
    MalformedGame(String),

    #[error("malformed game on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}
