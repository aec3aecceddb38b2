//! Server-side request rewrites.

use http::{Request, Uri};

use crate::error::{Error, Result};
use crate::rule::{MatchResult, Rule};

/// Rewrites the target of a matching request in place.
#[derive(Debug, Clone)]
pub struct ImplicitRedirector {
    rule: Rule,
}

impl ImplicitRedirector {
    /// Create a rewriter for `rule`.
    pub fn new(rule: Rule) -> Self {
        Self { rule }
    }

    /// The rule this handler fires on.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Pattern matched against the request target.
    pub fn pattern(&self) -> &str {
        self.rule.pattern()
    }

    /// Rewrite `request` if the rule matches.
    ///
    /// `None` when the rule does not match. `Some(Ok(to))` with the new
    /// target after a rewrite. `Some(Err(_))` when the rule matches but the
    /// target cannot be built; the request is left untouched and later
    /// implicit handlers must not be tried.
    pub fn update<B>(&self, request: &mut Request<B>) -> Option<Result<String>> {
        let target = request.uri().to_string();
        let groups = self.rule.captures(&target)?;
        Some(self.rewrite_with(request, &groups))
    }

    /// Rewrite `request` using a match produced by the matcher.
    pub fn rewrite<B>(&self, request: &mut Request<B>, matched: &MatchResult<'_>) -> Result<String> {
        self.rewrite_with(request, matched.groups())
    }

    fn rewrite_with<B>(&self, request: &mut Request<B>, groups: &[String]) -> Result<String> {
        let to = self.rule.template().substitute(groups)?;
        let uri: Uri = to.parse().map_err(|_| Error::InvalidTarget(to.clone()))?;
        *request.uri_mut() = uri;
        Ok(to)
    }
}
