//! Target templates with positional `$N` placeholders.
//!
//! A raw template such as `/new/$1?page=$2` is compiled once at load time
//! into a sequence of literal and placeholder segments. Substitution walks
//! the segments and splices in capture groups by their 1-based index.
//!
//! Everything that is not `$` followed by at least one ASCII digit is kept
//! verbatim, so a lone `$`, `$x` or a literal `%` in a target survive
//! untouched.

use std::fmt;

use crate::error::FormatError;

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// 1-based capture group index as written (`$0` is kept and rejected at substitution)
    Group(usize),
}

/// A compiled target template.
///
/// # Examples
/// ```
/// use redirector::Template;
///
/// let template = Template::compile("/new/$1");
/// assert_eq!(template.substitute(&["42"]).unwrap(), "/new/42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile a raw template (the rule value with its kind prefix stripped).
    pub fn compile(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            if c != '$' {
                literal.push(c);
                continue;
            }

            let start = pos + 1;
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                end = i + 1;
                chars.next();
            }

            if end == start {
                literal.push('$');
                continue;
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            // Indices too large for usize can never be satisfied
            let index = raw[start..end].parse().unwrap_or(usize::MAX);
            segments.push(Segment::Group(index));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: raw.to_string(),
            segments,
        }
    }

    /// The raw template text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Highest placeholder index referenced, or 0 when there are none.
    pub fn max_group(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Group(i) => Some(*i),
                Segment::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Substitute capture groups into the template.
    ///
    /// `groups[0]` fills `$1`, `groups[1]` fills `$2` and so on. Fails when a
    /// placeholder refers past the end of `groups`, or for `$0`.
    pub fn substitute<S: AsRef<str>>(&self, groups: &[S]) -> Result<String, FormatError> {
        let mut out = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(0) => return Err(FormatError::ZeroIndex),
                Segment::Group(index) => {
                    let group = groups.get(index - 1).ok_or(FormatError::MissingGroup {
                        index: *index,
                        available: groups.len(),
                    })?;
                    out.push_str(group.as_ref());
                }
            }
        }

        Ok(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_placeholder() {
        let t = Template::compile("/new/$1");
        assert_eq!(t.substitute(&["42"]).unwrap(), "/new/42");
        assert_eq!(t.max_group(), 1);
    }

    #[test]
    fn test_multiple_and_repeated_placeholders() {
        let t = Template::compile("/$2/$1/$2");
        assert_eq!(t.substitute(&["a", "b"]).unwrap(), "/b/a/b");
        assert_eq!(t.max_group(), 2);
    }

    #[test]
    fn test_multi_digit_index() {
        let groups: Vec<String> = (1..=12).map(|i| format!("g{}", i)).collect();
        let t = Template::compile("x$12y$1");
        assert_eq!(t.substitute(&groups).unwrap(), "xg12yg1");
    }

    #[test]
    fn test_dollar_without_digits_is_literal() {
        let t = Template::compile("/cost/$/$x/$");
        assert_eq!(t.max_group(), 0);
        assert_eq!(t.substitute::<&str>(&[]).unwrap(), "/cost/$/$x/$");
    }

    #[test]
    fn test_percent_is_literal() {
        let t = Template::compile("/search?q=100%25&p=$1%s%1$s");
        assert_eq!(t.substitute(&["v"]).unwrap(), "/search?q=100%25&p=v%s%1$s");
    }

    #[test]
    fn test_no_placeholders() {
        let t = Template::compile("http://example.com/");
        assert_eq!(t.substitute(&["unused"]).unwrap(), "http://example.com/");
        assert_eq!(t.max_group(), 0);
    }

    #[test]
    fn test_missing_group() {
        let t = Template::compile("/y/$1");
        assert_eq!(
            t.substitute::<&str>(&[]),
            Err(FormatError::MissingGroup {
                index: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_zero_index_rejected() {
        let t = Template::compile("/all/$0");
        assert_eq!(t.substitute(&["a"]), Err(FormatError::ZeroIndex));
    }

    #[test]
    fn test_huge_index_does_not_panic() {
        let t = Template::compile("/$99999999999999999999999");
        assert!(matches!(
            t.substitute(&["a"]),
            Err(FormatError::MissingGroup { .. })
        ));
    }

    #[test]
    fn test_unicode_literals() {
        let t = Template::compile("/日本/$1/é");
        assert_eq!(t.substitute(&["語"]).unwrap(), "/日本/語/é");
        assert_eq!(t.to_string(), "/日本/$1/é");
    }

    #[test]
    fn test_literal_replacement_property() {
        let raw = "/a/$1/b-$2.html";
        let groups = ["x y", "$1"];
        let expected = raw.replace("$1", groups[0]).replace("$2", groups[1]);
        let actual = Template::compile(raw).substitute(&groups).unwrap();
        assert_eq!(actual, expected);
        // Group values are never re-interpreted as placeholders
        assert_eq!(actual, "/a/x y/b-$1.html");
    }
}
