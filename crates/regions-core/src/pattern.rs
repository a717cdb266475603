use std::fmt;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::{PatternError, Result};

const ANY_DEPTH: &str = "**";

/// One compiled Ant-style include pattern.
///
/// `*` and `?` never cross a `/`; a segment made only of `**` spans any number
/// of whole segments, including none. Everything else is literal.
#[derive(Debug, Clone)]
pub struct IncludeRegion {
    pattern: String,
    rooted: bool,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    AnyDepth,
    Literal(String),
    Wildcard(GlobMatcher),
}

impl IncludeRegion {
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidSegment`] if a wildcard segment cannot be
    /// compiled.
    pub fn new(pattern: &str) -> Result<Self> {
        let mut segments: Vec<Segment> = Vec::new();

        for token in tokenize(pattern) {
            let segment = Segment::compile(pattern, token)?;
            if matches!(segment, Segment::AnyDepth)
                && matches!(segments.last(), Some(Segment::AnyDepth))
            {
                continue;
            }
            segments.push(segment);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            rooted: pattern.starts_with('/'),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        if path.starts_with('/') != self.rooted {
            return false;
        }

        let parts: Vec<&str> = tokenize(path).collect();
        match_segments(&self.segments, &parts)
    }
}

impl fmt::Display for IncludeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl Segment {
    fn compile(pattern: &str, token: &str) -> Result<Self> {
        if token == ANY_DEPTH {
            return Ok(Self::AnyDepth);
        }

        if !token.contains(['*', '?']) {
            return Ok(Self::Literal(token.to_string()));
        }

        let matcher = GlobBuilder::new(&escape_segment(token))
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|source| PatternError::InvalidSegment {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Self::Wildcard(matcher))
    }

    fn matches(&self, part: &str) -> bool {
        match self {
            Self::AnyDepth => true,
            Self::Literal(literal) => literal == part,
            Self::Wildcard(matcher) => matcher.is_match(Path::new(part)),
        }
    }
}

/// Matches `pattern` against `path` without keeping the compiled form.
///
/// A pattern that fails to compile matches nothing.
#[must_use]
pub fn matches(pattern: &str, path: &str) -> bool {
    IncludeRegion::new(pattern).is_ok_and(|region| region.matches(path))
}

fn tokenize(value: &str) -> impl Iterator<Item = &str> {
    value.split('/').filter(|token| !token.is_empty())
}

fn match_segments(segments: &[Segment], parts: &[&str]) -> bool {
    match segments.split_first() {
        None => parts.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            (0..=parts.len()).any(|skip| match_segments(rest, &parts[skip..]))
        }
        Some((segment, rest)) => parts
            .split_first()
            .is_some_and(|(first, tail)| segment.matches(first) && match_segments(rest, tail)),
    }
}

// Keeps `*` and `?` as wildcards and makes every other glob metacharacter
// literal. Runs of `*` inside a segment behave like a single `*`.
fn escape_segment(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len() * 2);
    let mut previous_star = false;

    for ch in token.chars() {
        match ch {
            '*' if previous_star => continue,
            '*' => escaped.push('*'),
            '\\' | '[' | ']' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
        previous_star = ch == '*';
    }

    escaped
}
