// storefront/src/state/outcome.rs

//! Signals reported back to the UI after a store mutation.

use crate::error::{ApiFailure, StoreError};

/// Outcome of an optimistic mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
  /// The server accepted the change; local state now reflects it.
  Confirmed,
  /// The request failed and local state was restored to its pre-mutation snapshot.
  Reverted(ApiFailure),
  /// The input was refused before touching state or the network.
  Rejected(ApiFailure),
}

impl MutationOutcome {
  /// The boolean `ok` flag UI code branches on.
  pub fn ok(&self) -> bool {
    matches!(self, MutationOutcome::Confirmed)
  }

  pub fn failure(&self) -> Option<&ApiFailure> {
    match self {
      MutationOutcome::Confirmed => None,
      MutationOutcome::Reverted(f) | MutationOutcome::Rejected(f) => Some(f),
    }
  }

  pub(crate) fn rejected(err: StoreError) -> Self {
    MutationOutcome::Rejected(err.failure())
  }

  pub(crate) fn reverted(err: StoreError) -> Self {
    MutationOutcome::Reverted(err.failure())
  }
}
