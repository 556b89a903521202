// storefront/src/stores/content.rs

//! FAQ, site information and terms editing.

use crate::api::ContentApi;
use crate::error::{StoreError, StoreResult};
use crate::models::{FaqDraft, FaqEntry, SiteInfo, Terms};
use crate::state::shared::Shared;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct ContentStore {
  faq: Shared<Vec<FaqEntry>>,
  site_info: Shared<Option<SiteInfo>>,
  terms: Shared<Option<Terms>>,
  api: Arc<dyn ContentApi>,
}

impl ContentStore {
  pub fn new(api: Arc<dyn ContentApi>) -> Self {
    Self {
      faq: Shared::default(),
      site_info: Shared::default(),
      terms: Shared::default(),
      api,
    }
  }

  /// FAQ entries in display order.
  pub fn faq(&self) -> Vec<FaqEntry> {
    self.faq.snapshot()
  }

  pub fn site_info(&self) -> Option<SiteInfo> {
    self.site_info.snapshot()
  }

  pub fn terms(&self) -> Option<Terms> {
    self.terms.snapshot()
  }

  fn store_faq(&self, mut entries: Vec<FaqEntry>) {
    entries.sort_by_key(|e| e.position);
    self.faq.replace(entries);
  }

  #[instrument(name = "ContentStore::load_faq", skip(self), err(Display))]
  pub async fn load_faq(&self) -> StoreResult<()> {
    let entries = self.api.list_faq().await?;
    self.store_faq(entries);
    Ok(())
  }

  #[instrument(name = "ContentStore::create_faq", skip(self, draft), err(Display))]
  pub async fn create_faq(&self, draft: FaqDraft) -> StoreResult<FaqEntry> {
    validate_faq(&draft)?;
    let created = self.api.create_faq(&draft).await?;
    let mut entries = self.faq();
    entries.push(created.clone());
    self.store_faq(entries);
    Ok(created)
  }

  #[instrument(name = "ContentStore::update_faq", skip(self, draft), err(Display))]
  pub async fn update_faq(&self, faq_id: u64, draft: FaqDraft) -> StoreResult<FaqEntry> {
    validate_faq(&draft)?;
    let updated = self.api.update_faq(faq_id, &draft).await?;
    let mut entries = self.faq();
    match entries.iter_mut().find(|e| e.id == faq_id) {
      Some(entry) => *entry = updated.clone(),
      None => entries.push(updated.clone()),
    }
    self.store_faq(entries);
    Ok(updated)
  }

  #[instrument(name = "ContentStore::delete_faq", skip(self), err(Display))]
  pub async fn delete_faq(&self, faq_id: u64) -> StoreResult<()> {
    self.api.delete_faq(faq_id).await?;
    self.faq.update(|entries| entries.retain(|e| e.id != faq_id));
    Ok(())
  }

  #[instrument(name = "ContentStore::load_site_info", skip(self), err(Display))]
  pub async fn load_site_info(&self) -> StoreResult<SiteInfo> {
    let info = self.api.get_site_info().await?;
    self.site_info.replace(Some(info.clone()));
    Ok(info)
  }

  #[instrument(name = "ContentStore::update_site_info", skip(self, info), err(Display))]
  pub async fn update_site_info(&self, info: SiteInfo) -> StoreResult<SiteInfo> {
    if info.name.trim().is_empty() {
      return Err(StoreError::Validation("Site name is required.".to_string()));
    }
    let saved = self.api.update_site_info(&info).await?;
    self.site_info.replace(Some(saved.clone()));
    Ok(saved)
  }

  #[instrument(name = "ContentStore::load_terms", skip(self), err(Display))]
  pub async fn load_terms(&self) -> StoreResult<Terms> {
    let terms = self.api.get_terms().await?;
    self.terms.replace(Some(terms.clone()));
    Ok(terms)
  }

  #[instrument(name = "ContentStore::update_terms", skip(self, content), err(Display))]
  pub async fn update_terms(&self, content: &str) -> StoreResult<Terms> {
    if content.trim().is_empty() {
      return Err(StoreError::Validation("Terms cannot be empty.".to_string()));
    }
    let saved = self.api.update_terms(content).await?;
    self.terms.replace(Some(saved.clone()));
    Ok(saved)
  }
}

fn validate_faq(draft: &FaqDraft) -> StoreResult<()> {
  if draft.question.trim().is_empty() || draft.answer.trim().is_empty() {
    return Err(StoreError::Validation("Question and answer are required.".to_string()));
  }
  Ok(())
}
