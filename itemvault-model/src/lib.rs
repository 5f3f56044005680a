//! Per-type registration metadata for ItemVault.
//!
//! An application registers each entity type once as an [`ItemShape`]: the
//! validated type name, an ordered field metadata table (which fields are
//! tracked, encrypted, or excluded), the permitted command operations, the
//! event policy, and an optional validator. Providers consult the shape;
//! nothing here touches a backing store.

mod policy;
mod shape;
mod validator;

pub use policy::{CommandOperations, EventPolicy};
pub use shape::{FieldKind, FieldSpec, ItemShape, ShapeError, ShapeResult};
pub use validator::ItemValidator;
