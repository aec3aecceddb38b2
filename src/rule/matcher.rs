//! First-match-wins pattern matching over an ordered rule list.

use super::Rule;
use crate::error::FormatError;

/// A rule that matched an input, with its captured groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    rule: &'a Rule,
    position: usize,
    groups: Vec<String>,
}

impl<'a> MatchResult<'a> {
    /// The matching rule.
    pub fn rule(&self) -> &'a Rule {
        self.rule
    }

    /// Index of the matching rule in the list it was found in.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Captured groups, `groups()[0]` being `$1`.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Substitute the captured groups into the rule's template.
    pub fn substitute(&self) -> Result<String, FormatError> {
        self.rule.template().substitute(&self.groups)
    }
}

/// Find the first rule whose pattern matches `input`.
///
/// Each rule is tried at most once, in order. `None` is the normal
/// pass-through case.
pub fn find_match<'a>(rules: &'a [Rule], input: &str) -> Option<MatchResult<'a>> {
    rules.iter().enumerate().find_map(|(position, rule)| {
        rule.captures(input).map(|groups| MatchResult {
            rule,
            position,
            groups,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(entries: &[(&str, &str)]) -> Vec<Rule> {
        entries
            .iter()
            .map(|(k, v)| Rule::from_entry(k, v).unwrap())
            .collect()
    }

    #[test]
    fn test_first_match_wins() {
        let rules = rules(&[
            (r"^/a/(\d+)$", "E:/first/$1"),
            (r"^/a/(.+)$", "E:/second/$1"),
        ]);

        let m = find_match(&rules, "/a/7").unwrap();
        assert_eq!(m.position(), 0);
        assert_eq!(m.substitute().unwrap(), "/first/7");

        let m = find_match(&rules, "/a/x").unwrap();
        assert_eq!(m.position(), 1);
        assert_eq!(m.groups(), ["x".to_string()]);
        assert_eq!(m.substitute().unwrap(), "/second/x");
    }

    #[test]
    fn test_no_match() {
        let rules = rules(&[(r"^/old/(\d+)$", "E:/new/$1")]);
        assert!(find_match(&rules, "/new/42").is_none());
        assert!(find_match(&[], "/anything").is_none());
    }

    #[test]
    fn test_overflow_surfaces_on_substitute() {
        let rules = rules(&[("^/x$", "E:/y/$1"), ("^/(x)$", "E:/z/$1")]);
        let m = find_match(&rules, "/x").unwrap();
        // The earlier rule is still the match; later rules are not consulted
        assert_eq!(m.position(), 0);
        assert!(m.substitute().is_err());
    }
}
