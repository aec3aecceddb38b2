//! Error types for redirector.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for redirector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration source could not be read (or seeded with the default)
    #[error("cannot read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A rule key is not a valid regular expression
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Malformed rule entry
    #[error("malformed rule entry: {0}")]
    Entry(#[from] EntryError),

    /// Template substitution failed
    #[error("substitution failed: {0}")]
    Format(#[from] FormatError),

    /// Substituted target is not usable as a URI or header value
    #[error("invalid redirection target: {0}")]
    InvalidTarget(String),

    /// A redirector has already been published globally
    #[error("redirector already installed")]
    AlreadyInstalled,
}

/// Result type alias for redirector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for a single configuration entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// Key present without a value
    #[error("missing value")]
    MissingValue,

    /// Nothing follows the two-character kind prefix
    #[error("value too short: {0:?}")]
    TooShort(String),

    /// Value does not start with I: or E:
    #[error("invalid value: {0} (must start with I: or E:)")]
    UnknownPrefix(String),
}

/// Error type for template substitution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Placeholder refers past the last capture group
    #[error("placeholder ${index} refers to a missing capture group ({available} available)")]
    MissingGroup { index: usize, available: usize },

    /// `$0` is not a 1-based placeholder
    #[error("placeholder $0 is not allowed, capture groups start at $1")]
    ZeroIndex,
}
