//! Vote increment validation

use serde::Deserialize;
use serde_json::Value;

use super::ValidationError;

/// Body of `PATCH /api/articles/{id}`.
///
/// `inc_votes` is kept as raw JSON so a wrong type is reported as a
/// validation failure instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VotePatch {
    #[serde(default)]
    pub inc_votes: Option<Value>,
}

impl VotePatch {
    pub fn new(inc_votes: i32) -> Self {
        Self {
            inc_votes: Some(Value::from(inc_votes)),
        }
    }

    /// The increment to apply. Zero is a valid increment.
    pub fn increment(&self) -> Result<i32, ValidationError> {
        let value = self
            .inc_votes
            .as_ref()
            .ok_or(ValidationError::Missing { field: "inc_votes" })?;

        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(ValidationError::InvalidField {
                field: "inc_votes",
                reason: "must be a 32-bit integer",
            })
    }
}
