//! Loader configuration types.

/// What to do with a rule key that is not a valid regular expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternPolicy {
    /// Abort the load pass with an error
    #[default]
    Fail,
    /// Log a warning and skip the entry
    Skip,
}

impl PatternPolicy {
    /// Get the internal name of this policy.
    pub fn name(&self) -> &'static str {
        match self {
            PatternPolicy::Fail => "fail",
            PatternPolicy::Skip => "skip",
        }
    }

    /// Parse a policy from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fail" => Some(PatternPolicy::Fail),
            "skip" => Some(PatternPolicy::Skip),
            _ => None,
        }
    }
}

/// Configuration for loading rules and building redirect responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Handling of invalid rule patterns
    pub pattern_policy: PatternPolicy,
    /// Value of the `Server` header on redirect responses
    pub server_name: String,
}

impl LoaderConfig {
    /// Create a new LoaderConfig.
    pub fn new(pattern_policy: PatternPolicy, server_name: impl Into<String>) -> Self {
        Self {
            pattern_policy,
            server_name: server_name.into(),
        }
    }

    /// Default configuration with a different pattern policy.
    pub fn with_policy(pattern_policy: PatternPolicy) -> Self {
        Self {
            pattern_policy,
            ..Self::default()
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            pattern_policy: PatternPolicy::default(),
            server_name: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}
