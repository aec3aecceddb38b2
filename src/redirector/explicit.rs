//! Client-visible redirects.

use http::header::{HeaderValue, CONNECTION, CONTENT_LENGTH, LOCATION, SERVER};
use http::{Request, Response, StatusCode};

use crate::error::{Error, Result};
use crate::rule::{MatchResult, Rule};

/// Answers a matching request with `302 Found` pointing at the substituted target.
#[derive(Debug, Clone)]
pub struct ExplicitRedirector {
    rule: Rule,
    server: HeaderValue,
}

impl ExplicitRedirector {
    /// Create a redirector for `rule`, announcing `server` in the `Server` header.
    pub fn new(rule: Rule, server: &str) -> Result<Self> {
        let server = HeaderValue::from_str(server)
            .map_err(|_| Error::Config(format!("invalid server name {:?}", server)))?;
        Ok(Self { rule, server })
    }

    /// The rule this handler fires on.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Pattern matched against the request target.
    pub fn pattern(&self) -> &str {
        self.rule.pattern()
    }

    /// Handle a request.
    ///
    /// `None` when the rule does not match. `Some(Err(_))` when it matches
    /// but the redirect cannot be built; the caller must then stop looking
    /// at later explicit handlers and let the request through.
    pub fn handle<B>(&self, request: &Request<B>) -> Option<Result<Response<()>>> {
        let target = request.uri().to_string();
        let groups = self.rule.captures(&target)?;
        Some(self.respond(&groups))
    }

    /// Build the redirect for a match produced by the matcher.
    pub fn redirect(&self, matched: &MatchResult<'_>) -> Result<Response<()>> {
        self.respond(matched.groups())
    }

    fn respond(&self, groups: &[String]) -> Result<Response<()>> {
        let location = self.rule.template().substitute(groups)?;
        let location_value =
            HeaderValue::from_str(&location).map_err(|_| Error::InvalidTarget(location.clone()))?;

        Response::builder()
            .status(StatusCode::FOUND)
            .header(CONNECTION, "close")
            .header(SERVER, self.server.clone())
            .header(CONTENT_LENGTH, "0")
            .header(LOCATION, location_value)
            .body(())
            .map_err(|e| Error::InvalidTarget(e.to_string()))
    }
}
