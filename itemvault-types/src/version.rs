use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque optimistic-concurrency token ("ETag").
///
/// A stamp is issued by the backing store on every successful write and is
/// compared by exact string equality. The content carries no meaning beyond
/// uniqueness per write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionStamp(String);

impl VersionStamp {
    /// Issues a fresh, unique stamp.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing stamp value.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the stamp value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks an expected stamp against this stored one.
    ///
    /// Comparison is exact string equality; a mismatch yields
    /// `Error::VersionConflict` and mutates nothing.
    pub fn validate(&self, expected: &VersionStamp) -> Result<()> {
        if self.0 == expected.0 {
            Ok(())
        } else {
            Err(Error::VersionConflict {
                expected: expected.0.clone(),
                actual: self.0.clone(),
            })
        }
    }
}

impl Default for VersionStamp {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VersionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
