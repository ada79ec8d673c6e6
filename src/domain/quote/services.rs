use std::sync::Arc;
use uuid::Uuid;

use super::entities::{QuoteDraft, QuoteIdentity, QuoteRecord};
use super::errors::QuoteError;
use super::ports::QuoteStore;
use super::value_objects::QuoteStatus;

/// Store-facing operations on persisted quotes. Draft editing goes through
/// `QuoteEditor`; everything here acts on records already in the store.
pub struct QuoteService {
  store: Arc<dyn QuoteStore>,
}

impl QuoteService {
  pub fn new(store: Arc<dyn QuoteStore>) -> Self {
    Self { store }
  }

  pub async fn get_quote(&self, id: Uuid) -> Result<QuoteRecord, QuoteError> {
    self
      .store
      .find_by_id(id)
      .await?
      .ok_or(QuoteError::QuoteNotFound(id))
  }

  pub async fn list_quotes(
    &self,
    status: Option<QuoteStatus>,
  ) -> Result<Vec<QuoteRecord>, QuoteError> {
    self.store.list(status).await
  }

  pub async fn delete_quote(&self, id: Uuid) -> Result<(), QuoteError> {
    // Ensure a meaningful not-found error rather than a silent no-op.
    let record = self.get_quote(id).await?;
    self.store.delete(id).await?;
    tracing::info!(
      quote_number = record.quote_number.as_deref().unwrap_or("-"),
      "Quote deleted"
    );
    Ok(())
  }

  /// Copy-then-insert: a new draft with the same customer, line items,
  /// labor, markup and notes, status reset to draft, and a fresh identity
  /// allocated by the store.
  pub async fn duplicate_quote(&self, id: Uuid) -> Result<(QuoteIdentity, QuoteRecord), QuoteError> {
    let record = self.get_quote(id).await?;
    let copy = QuoteDraft::from_record(record)?.duplicate();

    let identity = self.store.upsert(copy.to_record()).await?;
    tracing::info!(quote_number = %identity.number, "Quote duplicated");

    let mut persisted = copy;
    persisted.identity = Some(identity.clone());
    Ok((identity, persisted.to_record()))
  }

  /// Set the quote status. Transitions are deliberately unrestricted,
  /// including backward moves such as accepted -> draft.
  pub async fn change_status(
    &self,
    id: Uuid,
    status: QuoteStatus,
  ) -> Result<QuoteRecord, QuoteError> {
    let mut record = self.get_quote(id).await?;
    record.status = status;
    self.store.upsert(record.clone()).await?;
    Ok(record)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::quote::entities::CustomerInfo;
  use crate::infrastructure::persistence::InMemoryQuoteStore;
  use rust_decimal_macros::dec;

  async fn seeded_store() -> (Arc<InMemoryQuoteStore>, Uuid) {
    let store = Arc::new(InMemoryQuoteStore::new());
    let mut draft = QuoteDraft::new();
    draft.customer = CustomerInfo {
      name: "Dana Whitfield".to_string(),
      email: "dana@example.com".to_string(),
      ..Default::default()
    };
    let identity = store.upsert(draft.to_record()).await.unwrap();
    (store, identity.id)
  }

  #[tokio::test]
  async fn test_get_quote_not_found() {
    let store = Arc::new(InMemoryQuoteStore::new());
    let service = QuoteService::new(store);
    assert!(matches!(
      service.get_quote(Uuid::new_v4()).await,
      Err(QuoteError::QuoteNotFound(_))
    ));
  }

  #[tokio::test]
  async fn test_duplicate_allocates_new_identity_and_resets_status() {
    let (store, id) = seeded_store().await;
    let service = QuoteService::new(store.clone());

    let original = service
      .change_status(id, QuoteStatus::Accepted)
      .await
      .unwrap();

    let (identity, copy) = service.duplicate_quote(id).await.unwrap();
    assert_ne!(Some(identity.id), original.id);
    assert_ne!(copy.quote_number, original.quote_number);
    assert_eq!(copy.status, QuoteStatus::Draft);
    assert_eq!(copy.customer, original.customer);

    // Both the original and the copy live in the store.
    assert_eq!(store.list(None).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn test_status_moves_freely_in_both_directions() {
    let (store, id) = seeded_store().await;
    let service = QuoteService::new(store);

    service.change_status(id, QuoteStatus::Sent).await.unwrap();
    service
      .change_status(id, QuoteStatus::Accepted)
      .await
      .unwrap();
    let record = service.change_status(id, QuoteStatus::Draft).await.unwrap();
    assert_eq!(record.status, QuoteStatus::Draft);
  }

  #[tokio::test]
  async fn test_delete_quote() {
    let (store, id) = seeded_store().await;
    let service = QuoteService::new(store.clone());

    service.delete_quote(id).await.unwrap();
    assert!(store.find_by_id(id).await.unwrap().is_none());
    assert!(service.delete_quote(id).await.is_err());
  }

  #[tokio::test]
  async fn test_list_filters_by_status() {
    let (store, id) = seeded_store().await;
    let service = QuoteService::new(store.clone());

    let mut other = QuoteDraft::new();
    other.customer.name = "Miguel Reyes".to_string();
    other.markup_percent = crate::domain::quote::value_objects::MarkupPercent::new(dec!(10));
    store.upsert(other.to_record()).await.unwrap();

    service.change_status(id, QuoteStatus::Sent).await.unwrap();

    assert_eq!(service.list_quotes(None).await.unwrap().len(), 2);
    let sent = service
      .list_quotes(Some(QuoteStatus::Sent))
      .await
      .unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].customer.name, "Dana Whitfield");
  }
}
