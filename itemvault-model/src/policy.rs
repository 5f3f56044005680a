use serde::{Deserialize, Serialize};

/// Which field changes a save records in its audit event.
///
/// Fixed per entity-type registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPolicy {
    /// No event is emitted at all.
    Disabled,
    /// An event is emitted with `changes` omitted.
    NoChanges,
    /// Only fields explicitly marked tracked are considered.
    OnlyTrackedChanges,
    /// Every declared field is considered except explicitly excluded ones.
    AllChanges,
}

/// The set of permitted operations for an entity type.
///
/// Fixed per registration; any disallowed operation is rejected before a
/// command is constructed or the store contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandOperations(u8);

impl CommandOperations {
    pub const CREATE: CommandOperations = CommandOperations(0b0001);
    pub const READ: CommandOperations = CommandOperations(0b0010);
    pub const UPDATE: CommandOperations = CommandOperations(0b0100);
    pub const DELETE: CommandOperations = CommandOperations(0b1000);

    /// No operations permitted.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// All four operations permitted.
    #[must_use]
    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// Read-only access.
    #[must_use]
    pub const fn read_only() -> Self {
        Self::READ
    }

    /// Combines two masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every operation in `ops` is permitted.
    #[must_use]
    pub const fn allows(self, ops: Self) -> bool {
        self.0 & ops.0 == ops.0
    }
}

impl std::ops::BitOr for CommandOperations {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
