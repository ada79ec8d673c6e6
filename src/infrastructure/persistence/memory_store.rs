use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::domain::quote::{
  QuoteError, QuoteIdentity, QuoteNumber, QuoteRecord, QuoteStatus, QuoteStore,
};

/// In-memory quote store used in development mode and tests, when no
/// remote backend is configured. Allocates sequential `Q-<n>` numbers the
/// way the real store does on insert.
pub struct InMemoryQuoteStore {
  records: Mutex<Vec<QuoteRecord>>,
  next_number: AtomicU64,
}

impl InMemoryQuoteStore {
  pub fn new() -> Self {
    Self {
      records: Mutex::new(Vec::new()),
      next_number: AtomicU64::new(100),
    }
  }
}

impl Default for InMemoryQuoteStore {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
  async fn upsert(&self, mut record: QuoteRecord) -> Result<QuoteIdentity, QuoteError> {
    let mut records = self.records.lock().expect("store lock poisoned");

    let id = match record.id {
      Some(id) => id,
      None => Uuid::new_v4(),
    };
    record.id = Some(id);

    if record.quote_number.is_none() {
      // Keep an already-assigned number if this id was seen before.
      record.quote_number = records
        .iter()
        .find(|existing| existing.id == Some(id))
        .and_then(|existing| existing.quote_number.clone())
        .or_else(|| {
          Some(format!(
            "Q-{}",
            self.next_number.fetch_add(1, Ordering::SeqCst)
          ))
        });
    }

    let identity = QuoteIdentity {
      id,
      number: QuoteNumber::new(
        record
          .quote_number
          .clone()
          .expect("quote number assigned above"),
      )?,
    };

    match records.iter_mut().find(|existing| existing.id == Some(id)) {
      Some(existing) => *existing = record,
      None => records.push(record),
    }

    Ok(identity)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<QuoteRecord>, QuoteError> {
    let records = self.records.lock().expect("store lock poisoned");
    Ok(records.iter().find(|r| r.id == Some(id)).cloned())
  }

  async fn delete(&self, id: Uuid) -> Result<(), QuoteError> {
    let mut records = self.records.lock().expect("store lock poisoned");
    records.retain(|r| r.id != Some(id));
    Ok(())
  }

  async fn list(&self, status: Option<QuoteStatus>) -> Result<Vec<QuoteRecord>, QuoteError> {
    let records = self.records.lock().expect("store lock poisoned");
    Ok(
      records
        .iter()
        .filter(|r| status.map(|s| r.status == s).unwrap_or(true))
        .cloned()
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::quote::{CustomerInfo, QuoteDraft};

  fn record(name: &str) -> QuoteRecord {
    let mut draft = QuoteDraft::new();
    draft.customer = CustomerInfo {
      name: name.to_string(),
      ..Default::default()
    };
    draft.to_record()
  }

  #[tokio::test]
  async fn test_insert_allocates_sequential_numbers() {
    let store = InMemoryQuoteStore::new();
    let first = store.upsert(record("A")).await.unwrap();
    let second = store.upsert(record("B")).await.unwrap();

    assert_eq!(first.number.value(), "Q-100");
    assert_eq!(second.number.value(), "Q-101");
    assert_ne!(first.id, second.id);
  }

  #[tokio::test]
  async fn test_update_keeps_identity() {
    let store = InMemoryQuoteStore::new();
    let identity = store.upsert(record("A")).await.unwrap();

    let mut updated = record("A updated");
    updated.id = Some(identity.id);
    updated.quote_number = Some(identity.number.value().to_string());
    let same = store.upsert(updated).await.unwrap();

    assert_eq!(same.id, identity.id);
    assert_eq!(same.number, identity.number);
    assert_eq!(store.list(None).await.unwrap().len(), 1);
    assert_eq!(
      store
        .find_by_id(identity.id)
        .await
        .unwrap()
        .unwrap()
        .customer
        .name,
      "A updated"
    );
  }

  #[tokio::test]
  async fn test_delete_and_not_found() {
    let store = InMemoryQuoteStore::new();
    let identity = store.upsert(record("A")).await.unwrap();
    store.delete(identity.id).await.unwrap();
    assert!(store.find_by_id(identity.id).await.unwrap().is_none());
  }
}
