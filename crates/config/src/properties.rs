//! `.properties` text format
//!
//! Supports the usual grammar: `key=value`, `key: value` and `key value`
//! pairs, `#` and `!` comment lines, backslash line continuations and the
//! `\t \n \r \f \uXXXX` escapes. Later duplicates of a key replace earlier
//! ones.

use std::collections::HashMap;
use std::str::FromStr;
use types::PropertiesError;

/// Flat key/value pairs parsed from property text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse property text
    pub fn parse(input: &str) -> Result<Self, PropertiesError> {
        let mut entries = HashMap::new();

        for (line_no, line) in logical_lines(input) {
            let (key, value) = split_entry(&line);
            let key = unescape(key, line_no)?;
            let value = unescape(value, line_no)?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for Properties {
    type Err = PropertiesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Split input on `\n`, `\r` or `\r\n`
fn natural_lines(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(idx) => {
                let line = &rest[..idx];
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Join continuation lines and drop blank and comment lines.
/// Yields the 1-based number of the first natural line of each entry.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, raw) in natural_lines(input).enumerate() {
        let line = raw.trim_start_matches(is_space);

        let (start, mut buffer) = match current.take() {
            Some(pending) => pending,
            None => {
                if line.is_empty() || line.starts_with(|c: char| c == '#' || c == '!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            buffer.push_str(&line[..line.len() - 1]);
            current = Some((start, buffer));
        } else {
            buffer.push_str(line);
            lines.push((start, buffer));
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

/// Split a logical line into raw key and value text
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;

    for (idx, c) in line.char_indices() {
        if !escaped && (c == '=' || c == ':') {
            key_end = idx;
            value_start = idx + 1;
            has_separator = true;
            break;
        }
        if !escaped && is_space(c) {
            key_end = idx;
            value_start = idx + 1;
            break;
        }
        escaped = c == '\\' && !escaped;
    }

    let mut value = &line[value_start..];
    loop {
        value = value.trim_start_matches(is_space);
        match value.chars().next() {
            Some(c @ ('=' | ':')) if !has_separator => {
                has_separator = true;
                value = &value[c.len_utf8()..];
            }
            _ => break,
        }
    }

    (&line[..key_end], value)
}

/// Resolve backslash escapes
fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = if hex.len() == 4 {
                    u32::from_str_radix(&hex, 16).ok()
                } else {
                    None
                };
                let decoded = code.and_then(char::from_u32).ok_or_else(|| {
                    PropertiesError::MalformedEscape {
                        line,
                        message: format!("invalid \\u{} encoding", hex),
                    }
                })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        let props = Properties::parse("a=1\nb: 2\nc 3\nd\t=\t4\ne\n").unwrap();
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("4"));
        assert_eq!(props.get("e"), Some(""));
        assert_eq!(props.len(), 5);
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let input = "# comment\n  ! another\n\n   \nkey=value\n";
        let props = Properties::parse(input).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn test_value_keeps_trailing_whitespace() {
        let props = Properties::parse("key =   spaced out  ").unwrap();
        assert_eq!(props.get("key"), Some("spaced out  "));
    }

    #[test]
    fn test_only_first_separator_is_consumed() {
        let props = Properties::parse("key = =value\nurl=http://host:80/a=b").unwrap();
        assert_eq!(props.get("key"), Some("=value"));
        assert_eq!(props.get("url"), Some("http://host:80/a=b"));
    }

    #[test]
    fn test_line_endings() {
        let props = Properties::parse("a=1\r\nb=2\rc=3").unwrap();
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
    }

    #[test]
    fn test_continuation_lines() {
        let input = "list=first, \\\n      second, \\\n      third\nnext=value";
        let props = Properties::parse(input).unwrap();
        assert_eq!(props.get("list"), Some("first, second, third"));
        assert_eq!(props.get("next"), Some("value"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let props = Properties::parse("path=C:\\\\\nnext=1").unwrap();
        assert_eq!(props.get("path"), Some("C:\\"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_continuation_at_end_of_input() {
        let props = Properties::parse("key=value\\").unwrap();
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn test_continued_line_is_not_a_comment() {
        let props = Properties::parse("key=a\\\n  #b").unwrap();
        assert_eq!(props.get("key"), Some("a#b"));
    }

    #[test]
    fn test_escapes() {
        let input = "tab=a\\tb\nkey\\ with\\ spaces=1\nsep\\=key=2\nsnow=\\u2603\nplain=\\q";
        let props = Properties::parse(input).unwrap();
        assert_eq!(props.get("tab"), Some("a\tb"));
        assert_eq!(props.get("key with spaces"), Some("1"));
        assert_eq!(props.get("sep=key"), Some("2"));
        assert_eq!(props.get("snow"), Some("\u{2603}"));
        assert_eq!(props.get("plain"), Some("q"));
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = Properties::parse("ok=1\nbad=\\u12").unwrap_err();
        assert!(matches!(err, PropertiesError::MalformedEscape { line: 2, .. }));

        let err = Properties::parse("bad=\\uzzzz").unwrap_err();
        assert!(matches!(err, PropertiesError::MalformedEscape { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let props: Properties = "key=first\nkey=second".parse().unwrap();
        assert_eq!(props.get("key"), Some("second"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_utf8_values() {
        let props = Properties::parse("greeting=héllo wörld").unwrap();
        assert_eq!(props.get("greeting"), Some("héllo wörld"));
    }

    #[test]
    fn test_from_iter() {
        let props: Properties = [("a.b", "1"), ("a.c", "2")].into_iter().collect();
        assert!(props.contains_key("a.b"));
        let mut keys: Vec<_> = props.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["a.b", "a.c"]);
    }
}
