//! Numeric path identifier validation
//!
//! Identifiers arrive as raw path segments and must be plain digit strings
//! that fit a Postgres `INT`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Digits only: no sign, no whitespace, no decimal point
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("invalid id regex"));

fn parse_id(resource: &'static str, s: &str) -> Result<i32, ValidationError> {
    let invalid = || ValidationError::InvalidId {
        resource,
        value: s.to_owned(),
    };

    if !DIGITS_RE.is_match(s) {
        return Err(invalid());
    }

    // Digit strings longer than i32::MAX overflow here
    s.parse::<i32>().map_err(|_| invalid())
}

/// Validated article identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleId(i32);

impl ArticleId {
    /// Parse an article id from a path segment.
    ///
    /// # Example
    /// ```
    /// use newsdesk_server::models::ArticleId;
    ///
    /// assert_eq!(ArticleId::parse("3").unwrap().get(), 3);
    /// assert!(ArticleId::parse("three").is_err());
    /// assert!(ArticleId::parse("-3").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        parse_id("Article", s).map(Self)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Validated comment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(i32);

impl CommentId {
    /// Parse a comment id from a path segment.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        parse_id("Comment", s).map(Self)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}
