//! New comment request validation

use serde::Deserialize;

use super::ValidationError;

/// Body of `POST /api/articles/{id}/comments`.
///
/// Unknown fields are ignored by serde; only `body` and `author` are ever
/// stored or echoed back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Comment input that passed shape validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidComment<'a> {
    pub body: &'a str,
    pub author: &'a str,
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::Missing { field }),
    }
}

impl NewComment {
    /// Check that both fields are present and not blank.
    ///
    /// Whether `author` names a real user is left to the foreign key.
    pub fn validate(&self) -> Result<ValidComment<'_>, ValidationError> {
        Ok(ValidComment {
            body: required("body", self.body.as_deref())?,
            author: required("author", self.author.as_deref())?,
        })
    }
}
