//! Error types for the lootrank library.
//!
//! All errors are represented by the [`LootrankError`] enum. Scoring and
//! ranking are pure batch computations over fixed inputs, so every error here
//! signals bad input data rather than a transient condition; nothing in this
//! crate retries.
//!
//! # Examples
//!
//! ```
//! use lootrank::error::{LootrankError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LootrankError::vocabulary("empty part list for slot 'ring'"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lootrank operations.
#[derive(Error, Debug)]
pub enum LootrankError {
    /// I/O errors (dataset file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or incomplete fragment vocabulary input
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// Malformed token collection input
    #[error("Collection error: {0}")]
    Collection(String),

    /// A composite slot string that violates the fragment grammar
    #[error("Parse error: {0}")]
    Parse(String),

    /// A parsed fragment absent from the frequency table. This is a
    /// vocabulary/collection mismatch, a precondition violation; silently
    /// defaulting the score would corrupt the rankings downstream.
    #[error("Lookup failure: fragment '{fragment}' not counted for slot '{slot}'")]
    LookupFailure { slot: String, fragment: String },

    /// A fragment with an observed frequency of zero encountered while
    /// scoring. The score would be infinite, so this is fatal.
    #[error("Data consistency error: fragment '{fragment}' has zero count in slot '{slot}'")]
    DataConsistency { slot: String, fragment: String },

    /// Position lookup for a score absent from the rank index
    #[error("Score {score} was never ranked for slot '{slot}'")]
    ScoreNotRanked { slot: String, score: u64 },

    /// Invalid operation (CLI-level misuse)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LootrankError.
pub type Result<T> = std::result::Result<T, LootrankError>;

impl LootrankError {
    /// Create a new vocabulary error.
    pub fn vocabulary<S: Into<String>>(msg: S) -> Self {
        LootrankError::Vocabulary(msg.into())
    }

    /// Create a new collection error.
    pub fn collection<S: Into<String>>(msg: S) -> Self {
        LootrankError::Collection(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        LootrankError::Parse(msg.into())
    }

    /// Create a new lookup failure.
    pub fn lookup<S: Into<String>, F: Into<String>>(slot: S, fragment: F) -> Self {
        LootrankError::LookupFailure {
            slot: slot.into(),
            fragment: fragment.into(),
        }
    }

    /// Create a new data consistency error.
    pub fn inconsistent<S: Into<String>, F: Into<String>>(slot: S, fragment: F) -> Self {
        LootrankError::DataConsistency {
            slot: slot.into(),
            fragment: fragment.into(),
        }
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        LootrankError::InvalidOperation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LootrankError::lookup("weapon", "Chrome Pistol");
        assert_eq!(
            err.to_string(),
            "Lookup failure: fragment 'Chrome Pistol' not counted for slot 'weapon'"
        );

        let err = LootrankError::inconsistent("ring", "Gold Ring");
        assert_eq!(
            err.to_string(),
            "Data consistency error: fragment 'Gold Ring' has zero count in slot 'ring'"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing dataset");
        let err: LootrankError = io_err.into();
        assert!(matches!(err, LootrankError::Io(_)));
    }
}
