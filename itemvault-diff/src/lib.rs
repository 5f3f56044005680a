//! Change-tracking diff engine for ItemVault.
//!
//! Two pieces: [`flatten`] turns a JSON value tree into a
//! pointer-addressed map, and [`compute_changes`] compares the flattened
//! baseline and current snapshots at each eligible declared field, subject
//! to the shape's event policy.

mod changes;
mod flatten;

pub use changes::compute_changes;
pub use flatten::flatten;
