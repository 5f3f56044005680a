//! Command and provider core for ItemVault.
//!
//! The unit-of-work layer: a caller asks a [`Provider`] for a [`Command`]
//! against an item (create / read-for-update / read-for-delete), mutates
//! the item through the command's handle, and saves. The save pipeline
//! serializes the current state (encrypting marked fields through the
//! cipher set), runs the registered validator, computes policy-filtered
//! changes against the baseline snapshot, submits a conditional write
//! gated on the baseline version stamp, and appends one audit event.
//!
//! Backing stores plug in underneath via the [`ItemStore`] primitive and
//! the [`ProviderFactory`] contract; the core never branches on store
//! type. Commands racing on the same identity are decided solely by the
//! store's atomic conditional write: one wins, the rest observe a
//! conflict. Nothing here retries anything.

mod codec;
mod command;
mod error;
mod factory;
mod provider;
mod store;

pub use command::{Command, CommandState};
pub use error::{ProviderError, ProviderResult, StoreError};
pub use factory::{ProviderFactory, ProviderStatus};
pub use provider::Provider;
pub use store::ItemStore;
