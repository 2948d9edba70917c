//! Newtype identifier for catalog products.
//!
//! The remote catalog owns identifiers and returns them as JSON strings, but
//! some mock datasets emit bare numbers. Both decode into the same `ProductId`.

use crate::CommerceError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A product identifier assigned by the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse user input into an ID, rejecting blank values.
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CommerceError::ValidationError(
                "product id must not be empty".to_string(),
            ));
        }
        if trimmed.contains('/') {
            return Err(CommerceError::ValidationError(format!(
                "product id must not contain '/': {}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self(s),
            Repr::Number(n) => Self(n.to_string()),
        })
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
