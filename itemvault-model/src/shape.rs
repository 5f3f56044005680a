use crate::{CommandOperations, EventPolicy, ItemValidator};
use itemvault_types::TypeName;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for shape construction.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Errors raised while building an item shape. All are configuration
/// errors, surfaced at registration time and never retried.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error(transparent)]
    TypeName(#[from] itemvault_types::Error),

    #[error("field path {0:?} must be a top-level JSON pointer like \"/field\"")]
    InvalidFieldPath(String),

    #[error("field path {0:?} declared more than once")]
    DuplicateFieldPath(String),
}

/// Marker for one declared field.
///
/// Replaces the attribute-driven configuration of declarative systems with
/// an explicit per-type metadata table built once at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Externally visible; diffed only under `AllChanges`.
    Plain,
    /// Explicitly tracked; diffed under `OnlyTrackedChanges` and `AllChanges`.
    Tracked,
    /// Encrypted at rest via the cipher set; diffed like a plain field.
    Encrypted,
    /// Never diffed, even under `AllChanges`.
    Excluded,
}

/// One declared field: a top-level JSON pointer plus its marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// JSON pointer path (e.g., "/publicMessage").
    pub path: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn simple(path: &str, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Shorthand for a plain (untracked) field.
    pub fn plain(path: &str) -> Self {
        Self::simple(path, FieldKind::Plain)
    }

    /// Shorthand for a tracked field.
    pub fn tracked(path: &str) -> Self {
        Self::simple(path, FieldKind::Tracked)
    }

    /// Shorthand for an encrypted field.
    pub fn encrypted(path: &str) -> Self {
        Self::simple(path, FieldKind::Encrypted)
    }

    /// Shorthand for an excluded field.
    pub fn excluded(path: &str) -> Self {
        Self::simple(path, FieldKind::Excluded)
    }
}

/// Describes a registered entity type.
///
/// The field table's declaration order is the order changes are emitted in
/// audit events. Fields not declared here have no externally-visible name
/// and are never diffed.
#[derive(Clone)]
pub struct ItemShape {
    type_name: TypeName,
    fields: Vec<FieldSpec>,
    operations: CommandOperations,
    event_policy: EventPolicy,
    validator: Option<Arc<dyn ItemValidator>>,
}

impl ItemShape {
    /// Builds a shape, validating the type name and the field table.
    pub fn new(
        type_name: &str,
        fields: Vec<FieldSpec>,
        operations: CommandOperations,
        event_policy: EventPolicy,
    ) -> ShapeResult<Self> {
        let type_name = TypeName::parse(type_name)?;
        for (i, field) in fields.iter().enumerate() {
            if !field.path.starts_with('/') || field.path.len() < 2 || field.path[1..].contains('/')
            {
                return Err(ShapeError::InvalidFieldPath(field.path.clone()));
            }
            if fields[..i].iter().any(|f| f.path == field.path) {
                return Err(ShapeError::DuplicateFieldPath(field.path.clone()));
            }
        }
        Ok(Self {
            type_name,
            fields,
            operations,
            event_policy,
            validator: None,
        })
    }

    /// Attaches an optional validator, run against the current state before
    /// every write.
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn ItemValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The declared fields with the given marker, in declaration order.
    pub fn fields_of_kind(&self, kind: FieldKind) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.kind == kind)
    }

    /// Whether any field is marked encrypted.
    pub fn has_encrypted_fields(&self) -> bool {
        self.fields.iter().any(|f| f.kind == FieldKind::Encrypted)
    }

    pub fn operations(&self) -> CommandOperations {
        self.operations
    }

    pub fn event_policy(&self) -> EventPolicy {
        self.event_policy
    }

    pub fn validator(&self) -> Option<&Arc<dyn ItemValidator>> {
        self.validator.as_ref()
    }
}

impl std::fmt::Debug for ItemShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemShape")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("operations", &self.operations)
            .field("event_policy", &self.event_policy)
            .field("validator", &self.validator.as_ref().map(|_| "..."))
            .finish()
    }
}
