//! Flat `key = value` configuration reader.
//!
//! Keys are regular expressions, so backslashes are kept verbatim except for
//! `\=` (a literal `=` inside a key) and a trailing backslash (line
//! continuation). Lines starting with `#` or `!` are comments.

use std::io::{BufRead, BufReader, Read};

/// A single configuration entry in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Rule pattern
    pub key: String,
    /// Raw value including its kind prefix, `None` when the line had no `=`
    pub value: Option<String>,
    /// 1-based line number where the entry starts
    pub line: usize,
}

impl Entry {
    /// Create an entry with a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            line: 0,
        }
    }
}

/// Parse entries from a reader.
///
/// Read errors are returned so callers can tell an unreadable source from a
/// malformed one.
pub fn parse<R: Read>(reader: R) -> std::io::Result<Vec<Entry>> {
    let buf_reader = BufReader::new(reader);
    let mut entries = Vec::new();
    let mut pending: Option<(String, usize)> = None;

    for (idx, line) in buf_reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;

        let (mut logical, start) = match pending.take() {
            Some((mut acc, start)) => {
                acc.push_str(line.trim_start());
                (acc, start)
            }
            None => {
                let trimmed = line.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (trimmed.to_string(), line_no)
            }
        };

        if ends_with_continuation(&logical) {
            logical.pop();
            pending = Some((logical, start));
            continue;
        }

        entries.push(split_entry(&logical, start));
    }

    if let Some((logical, start)) = pending {
        entries.push(split_entry(&logical, start));
    }

    Ok(entries)
}

/// Odd number of trailing backslashes means the line continues.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=`.
fn split_entry(line: &str, line_no: usize) -> Entry {
    let mut key = String::new();
    let mut chars = line.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, '=')) => key.push('='),
                Some((_, next)) => {
                    key.push('\\');
                    key.push(next);
                }
                None => key.push('\\'),
            },
            '=' => {
                return Entry {
                    key: key.trim().to_string(),
                    value: Some(line[pos + 1..].trim().to_string()),
                    line: line_no,
                };
            }
            _ => key.push(c),
        }
    }

    Entry {
        key: key.trim().to_string(),
        value: None,
        line: line_no,
    }
}
