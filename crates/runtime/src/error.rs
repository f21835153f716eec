//! Run-level errors.

use perk_core::SettingsError;

use crate::store::StoreError;

/// Errors that abort a patch run.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PatchError {
    /// Settings validation failed; no store mutation has happened.
    #[error("invalid settings: {0:?}")]
    InvalidSettings(Vec<SettingsError>),

    /// The record store could not resolve a required record.
    #[error(transparent)]
    Store(#[from] StoreError),
}
