// storefront/src/stores/notifications.rs

use crate::api::NotificationsApi;
use crate::error::{StoreError, StoreResult};
use crate::models::{Notification, NotificationDraft, PageRequest};
use crate::optimistic::perform_optimistic;
use crate::pagination::Paginated;
use crate::state::outcome::MutationOutcome;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct NotificationsStore {
  pages: Paginated<Notification>,
  per_page: u32,
  api: Arc<dyn NotificationsApi>,
}

impl NotificationsStore {
  pub fn new(api: Arc<dyn NotificationsApi>, per_page: u32) -> Self {
    Self {
      pages: Paginated::new(),
      per_page,
      api,
    }
  }

  pub fn pages(&self) -> &Paginated<Notification> {
    &self.pages
  }

  /// Unread notifications on the loaded page, for the bell badge.
  pub fn unread_count(&self) -> usize {
    self.pages.slot().read().items.iter().filter(|n| !n.read).count()
  }

  #[instrument(name = "NotificationsStore::load_page", skip(self), err(Display))]
  pub async fn load_page(&self, page: u32) -> StoreResult<()> {
    let api = Arc::clone(&self.api);
    self
      .pages
      .load(PageRequest::new(page, self.per_page), |req| async move {
        api.list_notifications(req).await
      })
      .await
  }

  pub async fn retry(&self) -> StoreResult<()> {
    let api = Arc::clone(&self.api);
    self
      .pages
      .retry(|req| async move { api.list_notifications(req).await })
      .await
  }

  async fn refresh(&self) {
    let api = Arc::clone(&self.api);
    let result = self
      .pages
      .refresh(PageRequest::first(self.per_page), |req| async move {
        api.list_notifications(req).await
      })
      .await;
    if let Err(e) = result {
      event!(Level::WARN, error = %e, "Notification list refresh failed.");
    }
  }

  #[instrument(name = "NotificationsStore::create", skip(self, draft), err(Display))]
  pub async fn create(&self, draft: NotificationDraft) -> StoreResult<Notification> {
    validate(&draft)?;
    let created = self.api.create_notification(&draft).await?;
    self.refresh().await;
    Ok(created)
  }

  #[instrument(name = "NotificationsStore::update", skip(self, draft), err(Display))]
  pub async fn update(&self, notification_id: u64, draft: NotificationDraft) -> StoreResult<Notification> {
    validate(&draft)?;
    let updated = self.api.update_notification(notification_id, &draft).await?;
    self.pages.update_items(|items| {
      if let Some(item) = items.iter_mut().find(|n| n.id == notification_id) {
        *item = updated.clone();
      }
    });
    Ok(updated)
  }

  #[instrument(name = "NotificationsStore::delete", skip(self), err(Display))]
  pub async fn delete(&self, notification_id: u64) -> StoreResult<()> {
    self.api.delete_notification(notification_id).await?;
    self.refresh().await;
    Ok(())
  }

  /// Flips the read flag right away and restores it if the server refuses.
  #[instrument(name = "NotificationsStore::mark_read", skip(self))]
  pub async fn mark_read(&self, notification_id: u64) -> MutationOutcome {
    let already_read = self
      .pages
      .slot()
      .read()
      .items
      .iter()
      .find(|n| n.id == notification_id)
      .map(|n| n.read);
    match already_read {
      None => {
        return MutationOutcome::rejected(StoreError::Validation(format!(
          "Notification {} is not loaded.",
          notification_id
        )))
      }
      Some(true) => return MutationOutcome::Confirmed,
      Some(false) => {}
    }

    let result = perform_optimistic(
      self.pages.slot(),
      "notification_mark_read",
      |state| {
        if let Some(n) = state.items.iter_mut().find(|n| n.id == notification_id) {
          n.read = true;
        }
      },
      self.api.mark_notification_read(notification_id),
      |_, _| {},
    )
    .await;
    match result {
      Ok(()) => MutationOutcome::Confirmed,
      Err(e) => MutationOutcome::reverted(e),
    }
  }
}

fn validate(draft: &NotificationDraft) -> StoreResult<()> {
  if draft.title.trim().is_empty() || draft.message.trim().is_empty() {
    return Err(StoreError::Validation("Title and message are required.".to_string()));
  }
  Ok(())
}
