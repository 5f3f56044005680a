use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names that may never be used as a type discriminator.
/// "event" is the discriminator of the audit records themselves.
const RESERVED: &[&str] = &["event"];

/// A validated type discriminator.
///
/// Type names are lowercase ASCII letters and hyphens only, and must start
/// and end with a letter. Validation happens once at registration time,
/// before any provider is constructed for the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Validates and wraps a type name.
    pub fn parse(name: &str) -> Result<Self> {
        if RESERVED.contains(&name) {
            return Err(Error::ReservedTypeName(name.to_string()));
        }
        if name.is_empty() {
            return Err(Error::InvalidTypeName {
                name: name.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !c.is_ascii_lowercase() && *c != '-')
        {
            return Err(Error::InvalidTypeName {
                name: name.to_string(),
                reason: format!("character {bad:?} is not a lowercase letter or hyphen"),
            });
        }
        let first = name.chars().next().unwrap_or('-');
        let last = name.chars().next_back().unwrap_or('-');
        if !first.is_ascii_lowercase() || !last.is_ascii_lowercase() {
            return Err(Error::InvalidTypeName {
                name: name.to_string(),
                reason: "must start and end with a letter".to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
