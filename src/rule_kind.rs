//! Rule kind definitions.

use std::fmt;

use crate::error::EntryError;

/// Length of the kind prefix at the start of every rule value.
pub const PREFIX_LEN: usize = 2;

/// RuleKind decides how a matched rule is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Client-visible redirect (`E:` prefix)
    Explicit,
    /// Server-side rewrite of the request path (`I:` prefix)
    Implicit,
}

impl RuleKind {
    /// Parse the two-character prefix (`E:` or `I:`).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "E:" => Some(RuleKind::Explicit),
            "I:" => Some(RuleKind::Implicit),
            _ => None,
        }
    }

    /// Get the prefix used in configuration values.
    pub fn prefix(&self) -> &'static str {
        match self {
            RuleKind::Explicit => "E:",
            RuleKind::Implicit => "I:",
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Explicit => "EXPLICIT",
            RuleKind::Implicit => "IMPLICIT",
        }
    }

    /// Split a raw configuration value into its kind and template text.
    ///
    /// Values of [`PREFIX_LEN`] characters or fewer carry no template and are
    /// rejected before the prefix is looked at.
    pub fn split_value(value: &str) -> Result<(Self, &str), EntryError> {
        if value.chars().count() <= PREFIX_LEN {
            return Err(EntryError::TooShort(value.to_string()));
        }
        let (prefix, rest) = match value.get(..PREFIX_LEN) {
            Some(prefix) => (prefix, &value[PREFIX_LEN..]),
            None => return Err(EntryError::UnknownPrefix(value.to_string())),
        };
        let kind = Self::from_prefix(prefix)
            .ok_or_else(|| EntryError::UnknownPrefix(value.to_string()))?;
        Ok((kind, rest))
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
