//! Glob pattern compilation.
//!
//! # Responsibilities
//! - Translate glob syntax into anchored regular expressions
//! - Match `/`-separated relative paths against one or many patterns
//! - Apply the dot-file rule
//!
//! # Supported Syntax
//! - `**` any number of segments (zero included when followed by `/`)
//! - `*` any run of characters within one segment
//! - `?` one character within a segment
//! - `{a,b}` alternation, nestable
//! - `[abc]`, `[a-z]`, `[!a]` character classes
//! - `\x` literal `x`

use regex::Regex;

use crate::discovery::DiscoveryError;

/// One compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Glob {
    source: String,
    regex: Regex,
    explicit_dot: bool,
}

impl Glob {
    /// Compile a glob pattern.
    pub fn new(pattern: &str) -> Result<Self, DiscoveryError> {
        let trimmed = pattern.strip_prefix("./").unwrap_or(pattern);
        if trimmed.is_empty() {
            return Err(invalid(pattern, "pattern is empty"));
        }
        if trimmed.starts_with('/') {
            return Err(invalid(pattern, "pattern must be relative to the base directory"));
        }

        let translated = translate(trimmed).map_err(|reason| invalid(pattern, reason))?;
        let regex = Regex::new(&translated).map_err(|e| invalid(pattern, e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            explicit_dot: names_dot_segment(trimmed),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a `/`-separated relative path, honouring the dot-file rule.
    pub fn matches(&self, path: &str, dot: bool) -> bool {
        if !dot && !self.explicit_dot && has_dot_segment(path) {
            return false;
        }
        self.regex.is_match(path)
    }
}

/// A list of globs; a path matches when any member matches.
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    globs: Vec<Glob>,
}

impl GlobSet {
    pub fn new<I, P>(patterns: I) -> Result<Self, DiscoveryError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let globs = patterns
            .into_iter()
            .map(|p| Glob::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { globs })
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    pub fn matches(&self, path: &str, dot: bool) -> bool {
        self.globs.iter().any(|g| g.matches(path, dot))
    }
}

fn invalid(pattern: &str, reason: impl Into<String>) -> DiscoveryError {
    DiscoveryError::Pattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment.starts_with('.'))
}

fn names_dot_segment(pattern: &str) -> bool {
    pattern
        .split('/')
        .any(|segment| segment.starts_with('.') || segment.starts_with("{."))
        || pattern.contains(",.")
}

/// Translate a glob into an anchored regex source string.
fn translate(pattern: &str) -> Result<String, &'static str> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    let mut braces = 0usize;
    let mut i = 0;

    out.push('^');
    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' if chars.get(i + 1) == Some(&'*') => {
                let at_segment_start = i == 0 || matches!(chars[i - 1], '/' | '{' | ',');
                let next = chars.get(i + 2).copied();
                if at_segment_start && next == Some('/') {
                    out.push_str("(?:[^/]*/)*");
                    i += 3;
                } else if at_segment_start && matches!(next, None | Some('}') | Some(',')) {
                    out.push_str(".*");
                    i += 2;
                } else {
                    out.push_str("[^/]*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' => {
                braces += 1;
                out.push_str("(?:");
            }
            '}' if braces > 0 => {
                braces -= 1;
                out.push(')');
            }
            ',' if braces > 0 => out.push('|'),
            '[' => {
                i = translate_class(&chars, i, &mut out)?;
                continue;
            }
            '\\' => {
                let escaped = chars.get(i + 1).ok_or("trailing escape character")?;
                out.push_str(&regex::escape(&escaped.to_string()));
                i += 2;
                continue;
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
        i += 1;
    }

    if braces > 0 {
        return Err("unclosed `{`");
    }
    out.push('$');
    Ok(out)
}

/// Translate a `[...]` class starting at `start`; returns the index after `]`.
fn translate_class(chars: &[char], start: usize, out: &mut String) -> Result<usize, &'static str> {
    let mut i = start + 1;
    out.push('[');
    if matches!(chars.get(i), Some('!') | Some('^')) {
        out.push_str("^/");
        i += 1;
    }
    let body_start = i;
    loop {
        let c = *chars.get(i).ok_or("unclosed `[`")?;
        match c {
            ']' if i > body_start => {
                out.push(']');
                return Ok(i + 1);
            }
            '\\' => {
                let escaped = chars.get(i + 1).ok_or("unclosed `[`")?;
                out.push_str(&regex::escape(&escaped.to_string()));
                i += 2;
                continue;
            }
            '[' | ']' | '&' | '~' | '^' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
        i += 1;
    }
}
