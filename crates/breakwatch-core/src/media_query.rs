#![forbid(unsafe_code)]

//! Width-based media conditions.
//!
//! A [`MediaQuery`] is a conjunction of at most one `min-width` and one
//! `max-width` feature, both in CSS pixels and both inclusive. Its text form is
//! the subset of CSS media query syntax the environment understands:
//!
//! ```text
//! (min-width: 576px)
//! (max-width: 575px)
//! (min-width: 576px) and (max-width: 767px)
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty input | No feature given | `QueryParseError::Empty` |
//! | Unknown feature | e.g. `(orientation: portrait)` | `QueryParseError::UnknownFeature` |
//! | Bad length | Missing `px`, negative, or non-numeric | `QueryParseError::InvalidLength` |
//! | Repeated feature | Two `min-width` terms | `QueryParseError::DuplicateFeature` |

use std::fmt;
use std::str::FromStr;

/// Inclusive width predicate over the viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaQuery {
    min_width: Option<u32>,
    max_width: Option<u32>,
}

impl MediaQuery {
    /// `(min-width: {px}px)`
    #[must_use]
    pub const fn min_width(px: u32) -> Self {
        Self {
            min_width: Some(px),
            max_width: None,
        }
    }

    /// `(max-width: {px}px)`
    #[must_use]
    pub const fn max_width(px: u32) -> Self {
        Self {
            min_width: None,
            max_width: Some(px),
        }
    }

    /// `(min-width: {min}px) and (max-width: {max}px)`
    #[must_use]
    pub const fn between(min: u32, max: u32) -> Self {
        Self {
            min_width: Some(min),
            max_width: Some(max),
        }
    }

    /// Lower bound, if any.
    #[must_use]
    pub const fn min(&self) -> Option<u32> {
        self.min_width
    }

    /// Upper bound, if any.
    #[must_use]
    pub const fn max(&self) -> Option<u32> {
        self.max_width
    }

    /// Whether a viewport of `width` pixels satisfies this condition.
    #[must_use]
    pub fn matches(&self, width: u32) -> bool {
        self.min_width.is_none_or(|min| width >= min)
            && self.max_width.is_none_or(|max| width <= max)
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min_width, self.max_width) {
            (Some(min), Some(max)) => {
                write!(f, "(min-width: {min}px) and (max-width: {max}px)")
            }
            (Some(min), None) => write!(f, "(min-width: {min}px)"),
            (None, Some(max)) => write!(f, "(max-width: {max}px)"),
            // Unreachable through the public constructors and parser.
            (None, None) => f.write_str("all"),
        }
    }
}

/// Errors from parsing media query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParseError {
    /// No feature was supplied.
    Empty,
    /// Expected a specific token (`(`, `)`, `:`, `and`).
    Expected {
        expected: &'static str,
        found: String,
    },
    /// A feature other than `min-width`/`max-width`.
    UnknownFeature(String),
    /// A length that is not a non-negative integer followed by `px`.
    InvalidLength(String),
    /// The same feature appeared twice.
    DuplicateFeature(&'static str),
}

impl fmt::Display for QueryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty media query"),
            Self::Expected { expected, found } => {
                write!(f, "expected '{expected}' but found '{found}'")
            }
            Self::UnknownFeature(name) => write!(f, "unsupported media feature: {name}"),
            Self::InvalidLength(value) => write!(f, "invalid pixel length: {value}"),
            Self::DuplicateFeature(name) => write!(f, "duplicate media feature: {name}"),
        }
    }
}

impl std::error::Error for QueryParseError {}

impl FromStr for MediaQuery {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        if rest.is_empty() {
            return Err(QueryParseError::Empty);
        }

        let mut query = MediaQuery {
            min_width: None,
            max_width: None,
        };
        let mut first = true;
        while !rest.is_empty() {
            if !first {
                rest = strip_and(rest).ok_or_else(|| QueryParseError::Expected {
                    expected: "and",
                    found: rest.to_string(),
                })?;
            }
            first = false;

            let (feature, tail) = take_parenthesized(rest)?;
            rest = tail.trim_start();

            let (name, value) =
                feature
                    .split_once(':')
                    .ok_or_else(|| QueryParseError::Expected {
                        expected: ":",
                        found: feature.to_string(),
                    })?;
            let (slot, feature_name) = match name.trim().to_ascii_lowercase().as_str() {
                "min-width" => (&mut query.min_width, "min-width"),
                "max-width" => (&mut query.max_width, "max-width"),
                other => return Err(QueryParseError::UnknownFeature(other.to_string())),
            };
            set_once(slot, parse_px(value)?, feature_name)?;
        }
        Ok(query)
    }
}

/// Strip a leading `and` keyword followed by whitespace or `(`.
fn strip_and(input: &str) -> Option<&str> {
    let head = input.get(..3)?;
    if !head.eq_ignore_ascii_case("and") {
        return None;
    }
    let tail = &input[3..];
    match tail.chars().next() {
        Some(c) if c.is_whitespace() || c == '(' => Some(tail.trim_start()),
        _ => None,
    }
}

/// Split `(inner) tail` into `(inner, tail)`.
fn take_parenthesized(input: &str) -> Result<(&str, &str), QueryParseError> {
    let body = input
        .strip_prefix('(')
        .ok_or_else(|| QueryParseError::Expected {
            expected: "(",
            found: input.to_string(),
        })?;
    let close = body.find(')').ok_or_else(|| QueryParseError::Expected {
        expected: ")",
        found: body.to_string(),
    })?;
    Ok((&body[..close], &body[close + 1..]))
}

fn parse_px(value: &str) -> Result<u32, QueryParseError> {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    lower
        .strip_suffix("px")
        .and_then(|digits| digits.trim_end().parse::<u32>().ok())
        .ok_or_else(|| QueryParseError::InvalidLength(trimmed.to_string()))
}

fn set_once(
    slot: &mut Option<u32>,
    px: u32,
    name: &'static str,
) -> Result<(), QueryParseError> {
    if slot.is_some() {
        return Err(QueryParseError::DuplicateFeature(name));
    }
    *slot = Some(px);
    Ok(())
}

impl serde::Serialize for MediaQuery {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for MediaQuery {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
