//! Validation error types

use std::fmt;

/// Validation error for request input.
///
/// Every variant is detected from the shape of the request alone, before any
/// database round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Path identifier is not a positive integer
    InvalidId { resource: &'static str, value: String },

    /// `sort_by` is not in the allow-list for the resource
    InvalidSort { value: String },

    /// `order` is neither ASC nor DESC
    InvalidOrder { value: String },

    /// Required body field is missing or blank
    Missing { field: &'static str },

    /// Body field is present but has the wrong type or range
    InvalidField { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { resource, .. } => write!(f, "Invalid {} ID", resource),
            Self::InvalidSort { .. } => write!(f, "Invalid Sort Request"),
            Self::InvalidOrder { .. } => write!(f, "Invalid Order Request"),
            Self::Missing { .. } | Self::InvalidField { .. } => write!(f, "Bad Request"),
        }
    }
}

impl std::error::Error for ValidationError {}
