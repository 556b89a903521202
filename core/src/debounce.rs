// storefront/src/debounce.rs

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{event, Level};

/// Delays a value until input has been quiet for a fixed period.
///
/// Every [`push`](Debouncer::push) restarts the quiet period; only the last
/// value pushed before the period elapses reaches the handler. Dropping the
/// debouncer discards a pending value. Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
  tx: mpsc::UnboundedSender<T>,
  quiet: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
  pub fn spawn<F, Fut>(quiet: Duration, handler: F) -> Self
  where
    F: Fn(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run(rx, quiet, handler));
    Self { tx, quiet }
  }

  /// Records a new value (one keystroke) and restarts the quiet period.
  pub fn push(&self, value: T) {
    if self.tx.send(value).is_err() {
      event!(Level::WARN, "Debounce worker is gone, value dropped.");
    }
  }

  pub fn quiet_period(&self) -> Duration {
    self.quiet
  }
}

async fn run<T, F, Fut>(mut rx: mpsc::UnboundedReceiver<T>, quiet: Duration, handler: F)
where
  F: Fn(T) -> Fut,
  Fut: Future<Output = ()>,
{
  while let Some(mut latest) = rx.recv().await {
    loop {
      tokio::select! {
        next = rx.recv() => match next {
          Some(value) => latest = value,
          None => return,
        },
        _ = tokio::time::sleep(quiet) => break,
      }
    }
    event!(Level::TRACE, "Quiet period elapsed, firing.");
    handler(latest).await;
  }
}
