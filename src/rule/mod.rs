//! Redirection rules and capture-group access.

mod matcher;

pub use matcher::{find_match, MatchResult};

use regex::{Captures, Regex};

use crate::error::{Error, FormatError, Result};
use crate::rule_kind::RuleKind;
use crate::template::Template;

/// Ordered capture groups of a single pattern match.
///
/// Substitution only needs "the N-th captured string", so it is written
/// against this trait rather than a specific regex engine.
pub trait CaptureGroups {
    /// Number of capture groups in the pattern (not counting the whole match).
    fn group_count(&self) -> usize;

    /// Text captured by the 1-based group `index`, `None` if it did not participate.
    fn group(&self, index: usize) -> Option<&str>;

    /// Collect groups `1..=group_count()`; non-participating groups become empty strings.
    fn to_groups(&self) -> Vec<String> {
        (1..=self.group_count())
            .map(|i| self.group(i).unwrap_or_default().to_string())
            .collect()
    }
}

impl CaptureGroups for Captures<'_> {
    fn group_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    fn group(&self, index: usize) -> Option<&str> {
        self.get(index).map(|m| m.as_str())
    }
}

/// A single compiled redirection rule.
///
/// # Examples
/// ```
/// use redirector::{Rule, RuleKind};
///
/// let rule = Rule::from_entry(r"^/old/(\d+)$", "E:/new/$1").unwrap();
/// assert_eq!(rule.kind(), RuleKind::Explicit);
/// assert_eq!(rule.apply("/old/42").unwrap().unwrap(), "/new/42");
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    template: Template,
    kind: RuleKind,
}

impl Rule {
    /// Create a rule from a pattern, an already-stripped template and a kind.
    pub fn new(pattern: &str, template: &str, kind: RuleKind) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: regex,
            template: Template::compile(template),
            kind,
        })
    }

    /// Create a rule from a configuration entry (`key`, `E:...`/`I:...`).
    pub fn from_entry(key: &str, value: &str) -> Result<Self> {
        let (kind, template) = RuleKind::split_value(value)?;
        Self::new(key, template, kind)
    }

    /// Source pattern text.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Compiled target template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Dispatch kind.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Number of capture groups in the source pattern.
    pub fn group_count(&self) -> usize {
        self.pattern.captures_len() - 1
    }

    /// Whether every placeholder in the template can be filled by the pattern.
    pub fn is_consistent(&self) -> bool {
        self.template.max_group() <= self.group_count()
    }

    /// The configuration value this rule was built from, prefix included.
    pub fn value(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.template.source())
    }

    /// Match `input` and return the ordered capture groups.
    pub fn captures(&self, input: &str) -> Option<Vec<String>> {
        self.pattern.captures(input).map(|caps| caps.to_groups())
    }

    /// Match `input` and substitute its groups into the template.
    ///
    /// Returns `None` when the pattern does not match.
    pub fn apply(&self, input: &str) -> Option<std::result::Result<String, FormatError>> {
        self.captures(input)
            .map(|groups| self.template.substitute(&groups))
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.pattern.as_str() == other.pattern.as_str()
            && self.template == other.template
    }
}

impl Eq for Rule {}
