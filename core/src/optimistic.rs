// storefront/src/optimistic.rs

//! The snapshot → speculative apply → request → confirm-or-revert utility used
//! by every store that mutates ahead of the server.

use crate::error::StoreResult;
use crate::state::shared::Shared;
use std::future::Future;
use tracing::{event, instrument, Level};

/// Runs one optimistic mutation against `slot`.
///
/// 1. Snapshots the slot.
/// 2. Applies `apply` to the live value synchronously, so readers see the change
///    before the network call resolves.
/// 3. Awaits `request`.
/// 4. On success, hands the response to `on_success` under the write lock (for
///    example to swap a temporary id for the server's) and returns it.
///    On failure, restores the exact snapshot and returns the error.
///
/// The caller decides whether to follow a success with an authoritative refetch.
/// Concurrent mutations on the same slot are not serialized: a revert restores
/// this mutation's snapshot even if another mutation committed in between, so
/// stores that allow overlapping mutations refetch once the request settles.
#[instrument(name = "optimistic", skip_all, fields(mutation = label), err(Display))]
pub async fn perform_optimistic<T, R, Fut>(
  slot: &Shared<T>,
  label: &'static str,
  apply: impl FnOnce(&mut T),
  request: Fut,
  on_success: impl FnOnce(&mut T, &R),
) -> StoreResult<R>
where
  T: Clone + Send + Sync + 'static,
  Fut: Future<Output = StoreResult<R>>,
{
  let snapshot = {
    let mut guard = slot.write();
    let snapshot = (*guard).clone();
    apply(&mut *guard);
    snapshot
  };
  event!(Level::DEBUG, "Speculative change committed, awaiting server.");

  match request.await {
    Ok(response) => {
      slot.update(|value| on_success(value, &response));
      event!(Level::DEBUG, "Server confirmed mutation.");
      Ok(response)
    }
    Err(e) => {
      slot.replace(snapshot);
      event!(Level::WARN, error = %e, "Server rejected mutation, snapshot restored.");
      Err(e)
    }
  }
}

/// Replaces the slot with authoritative state from `fetch`.
///
/// Returns the fetch error untouched so the caller can mark the slice stale;
/// the slot keeps whatever it held before.
#[instrument(name = "reconcile", skip_all, fields(slice = label), err(Display))]
pub async fn reconcile<T, Fut>(slot: &Shared<T>, label: &'static str, fetch: Fut) -> StoreResult<()>
where
  T: Send + Sync + 'static,
  Fut: Future<Output = StoreResult<T>>,
{
  let fresh = fetch.await?;
  slot.replace(fresh);
  event!(Level::DEBUG, "Slice replaced with server state.");
  Ok(())
}
