use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::draft::{AutosaveConfig, DraftController, DraftOp, SaveBlocked, SaveStatus};
use super::entities::{QuoteDraft, QuoteIdentity, QuoteTotals};
use super::errors::QuoteError;
use super::ports::QuoteStore;

/// Result of a save attempt. Remote failures are reported here, never
/// thrown past the editor boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
  Saved { identity: QuoteIdentity },
  MissingCustomerName,
  SaveInFlight,
  Failed,
}

/// Current editor state for UI feedback.
#[derive(Debug, Clone, Serialize)]
pub struct EditorState {
  pub draft: QuoteDraft,
  pub totals: QuoteTotals,
  pub save_status: SaveStatus,
  pub dirty: bool,
}

/// Async shell around `DraftController`: serializes edits, runs the
/// debounced autosave loop, and performs upserts with a snapshot taken at
/// send time. The loop is cancelled when the editor is closed so no timer
/// outlives the draft it writes.
pub struct QuoteEditor {
  controller: Mutex<DraftController>,
  store: Arc<dyn QuoteStore>,
  autosave: AutosaveConfig,
  cancel: CancellationToken,
}

impl QuoteEditor {
  pub fn spawn(
    draft: QuoteDraft,
    store: Arc<dyn QuoteStore>,
    autosave: AutosaveConfig,
  ) -> Arc<Self> {
    let editor = Arc::new(Self {
      controller: Mutex::new(DraftController::new(draft)),
      store,
      autosave,
      cancel: CancellationToken::new(),
    });
    editor.clone().spawn_autosave_loop();
    editor
  }

  fn spawn_autosave_loop(self: Arc<Self>) {
    if !self.autosave.enabled {
      return;
    }

    tokio::spawn(async move {
      let mut interval =
        tokio::time::interval(Duration::from_millis(self.autosave.poll_interval_ms));
      loop {
        tokio::select! {
          _ = self.cancel.cancelled() => break,
          _ = interval.tick() => {
            let due = self.controller.lock().await.should_autosave(&self.autosave);
            if due && self.run_save().await == SaveOutcome::Failed {
              tracing::warn!("Autosave failed; draft stays dirty until retried");
            }
          }
        }
      }
      tracing::debug!("Autosave loop stopped");
    });
  }

  /// Apply one edit and return the recomputed totals.
  pub async fn apply(&self, op: DraftOp) -> Result<QuoteTotals, QuoteError> {
    self.controller.lock().await.apply(op)
  }

  /// Manual "Save Draft": same serialize-and-upsert path as the quiet
  /// period expiry, bypassing the timer.
  pub async fn save_now(&self) -> SaveOutcome {
    self.run_save().await
  }

  async fn run_save(&self) -> SaveOutcome {
    let pending = {
      let mut controller = self.controller.lock().await;
      match controller.begin_save() {
        Ok(pending) => pending,
        Err(SaveBlocked::MissingCustomerName) => return SaveOutcome::MissingCustomerName,
        Err(SaveBlocked::SaveInFlight) => return SaveOutcome::SaveInFlight,
      }
    };

    // Lock released: edits keep landing while the upsert is in flight.
    match self.store.upsert(pending.record).await {
      Ok(identity) => {
        let mut controller = self.controller.lock().await;
        controller.complete_save(pending.revision, identity.clone());
        tracing::debug!(quote_number = %identity.number, "Draft saved");
        SaveOutcome::Saved { identity }
      }
      Err(error) => {
        tracing::warn!("Quote save failed: {}", error);
        self.controller.lock().await.fail_save();
        SaveOutcome::Failed
      }
    }
  }

  pub async fn state(&self) -> EditorState {
    let controller = self.controller.lock().await;
    EditorState {
      draft: controller.draft().clone(),
      totals: controller.totals(),
      save_status: controller.save_status(),
      dirty: controller.is_dirty(),
    }
  }

  pub async fn snapshot(&self) -> QuoteDraft {
    self.controller.lock().await.draft().clone()
  }

  /// Tear down the editor. Cancels the autosave loop.
  pub fn close(&self) {
    self.cancel.cancel();
  }
}

impl Drop for QuoteEditor {
  fn drop(&mut self) {
    self.cancel.cancel();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::quote::entities::{CustomerInfo, QuoteRecord};
  use crate::domain::quote::value_objects::{QuoteNumber, QuoteStatus};
  use async_trait::async_trait;
  use rust_decimal_macros::dec;
  use tokio::sync::Notify;
  use uuid::Uuid;

  /// Store double: records upserts and allocates sequential numbers.
  #[derive(Default)]
  struct TestStore {
    records: std::sync::Mutex<Vec<QuoteRecord>>,
  }

  impl TestStore {
    fn saved(&self) -> Vec<QuoteRecord> {
      self.records.lock().unwrap().clone()
    }
  }

  #[async_trait]
  impl QuoteStore for TestStore {
    async fn upsert(&self, record: QuoteRecord) -> Result<QuoteIdentity, QuoteError> {
      let mut records = self.records.lock().unwrap();
      let identity = QuoteIdentity {
        id: record.id.unwrap_or_else(Uuid::new_v4),
        number: QuoteNumber::new(
          record
            .quote_number
            .clone()
            .unwrap_or_else(|| format!("Q-{}", 100 + records.len())),
        )
        .unwrap(),
      };
      records.push(record);
      Ok(identity)
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<QuoteRecord>, QuoteError> {
      Ok(None)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), QuoteError> {
      Ok(())
    }

    async fn list(&self, _status: Option<QuoteStatus>) -> Result<Vec<QuoteRecord>, QuoteError> {
      Ok(self.saved())
    }
  }

  /// Store double whose upsert blocks until released, for exercising
  /// edits that land while a save is in flight.
  struct GatedStore {
    entered: Notify,
    release: Notify,
  }

  impl GatedStore {
    fn new() -> Self {
      Self {
        entered: Notify::new(),
        release: Notify::new(),
      }
    }
  }

  #[async_trait]
  impl QuoteStore for GatedStore {
    async fn upsert(&self, _record: QuoteRecord) -> Result<QuoteIdentity, QuoteError> {
      self.entered.notify_one();
      self.release.notified().await;
      Ok(QuoteIdentity {
        id: Uuid::new_v4(),
        number: QuoteNumber::new("Q-100".to_string()).unwrap(),
      })
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<QuoteRecord>, QuoteError> {
      Ok(None)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), QuoteError> {
      Ok(())
    }

    async fn list(&self, _status: Option<QuoteStatus>) -> Result<Vec<QuoteRecord>, QuoteError> {
      Ok(vec![])
    }
  }

  /// Store double that always fails.
  struct FailingStore;

  #[async_trait]
  impl QuoteStore for FailingStore {
    async fn upsert(&self, _record: QuoteRecord) -> Result<QuoteIdentity, QuoteError> {
      Err(QuoteError::Store("backend unreachable".to_string()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<QuoteRecord>, QuoteError> {
      Ok(None)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), QuoteError> {
      Ok(())
    }

    async fn list(&self, _status: Option<QuoteStatus>) -> Result<Vec<QuoteRecord>, QuoteError> {
      Ok(vec![])
    }
  }

  fn fast_autosave() -> AutosaveConfig {
    AutosaveConfig {
      enabled: true,
      debounce_ms: 20,
      max_delay_ms: 500,
      poll_interval_ms: 5,
    }
  }

  fn set_customer(name: &str) -> DraftOp {
    DraftOp::SetCustomer {
      customer: CustomerInfo {
        name: name.to_string(),
        ..Default::default()
      },
    }
  }

  #[tokio::test]
  async fn test_autosave_fires_after_quiet_period() {
    let store = Arc::new(TestStore::default());
    let editor = QuoteEditor::spawn(QuoteDraft::new(), store.clone(), fast_autosave());

    editor.apply(set_customer("Dana Whitfield")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let saved = store.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].customer.name, "Dana Whitfield");

    let state = editor.state().await;
    assert!(!state.dirty);
    assert_eq!(state.save_status, SaveStatus::Saved);
    assert!(state.draft.identity.is_some());
    editor.close();
  }

  #[tokio::test]
  async fn test_manual_save_bypasses_timer() {
    let store = Arc::new(TestStore::default());
    // Long debounce: only the manual action can have saved.
    let autosave = AutosaveConfig {
      debounce_ms: 60_000,
      ..fast_autosave()
    };
    let editor = QuoteEditor::spawn(QuoteDraft::new(), store.clone(), autosave);

    editor.apply(set_customer("Dana Whitfield")).await.unwrap();
    let outcome = editor.save_now().await;
    assert!(matches!(outcome, SaveOutcome::Saved { .. }));
    assert_eq!(store.saved().len(), 1);
    editor.close();
  }

  #[tokio::test]
  async fn test_save_without_customer_name_is_blocked() {
    let store = Arc::new(TestStore::default());
    let editor = QuoteEditor::spawn(QuoteDraft::new(), store.clone(), fast_autosave());

    editor
      .apply(DraftOp::SetMarkup { percent: dec!(10) })
      .await
      .unwrap();
    assert_eq!(editor.save_now().await, SaveOutcome::MissingCustomerName);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(store.saved().is_empty());
    editor.close();
  }

  #[tokio::test]
  async fn test_edit_during_in_flight_save_is_not_clobbered() {
    let store = Arc::new(GatedStore::new());
    let autosave = AutosaveConfig {
      enabled: false,
      ..fast_autosave()
    };
    let editor = QuoteEditor::spawn(QuoteDraft::new(), store.clone(), autosave);

    editor.apply(set_customer("Dana Whitfield")).await.unwrap();

    let saver = {
      let editor = editor.clone();
      tokio::spawn(async move { editor.save_now().await })
    };

    // Wait until the upsert is in flight, then land a newer edit.
    store.entered.notified().await;
    editor
      .apply(DraftOp::SetNotes {
        notes: "gate code 4411".to_string(),
      })
      .await
      .unwrap();

    store.release.notify_one();
    let outcome = saver.await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Saved { .. }));

    let state = editor.state().await;
    // Newer in-memory values win; the response contributed identity only.
    assert_eq!(state.draft.notes, "gate code 4411");
    assert_eq!(
      state.draft.identity.as_ref().unwrap().number.value(),
      "Q-100"
    );
    assert!(state.dirty);
    editor.close();
  }

  #[tokio::test]
  async fn test_failed_save_reports_status_only() {
    let editor = QuoteEditor::spawn(
      QuoteDraft::new(),
      Arc::new(FailingStore),
      AutosaveConfig {
        enabled: false,
        ..fast_autosave()
      },
    );

    editor.apply(set_customer("Dana Whitfield")).await.unwrap();
    assert_eq!(editor.save_now().await, SaveOutcome::Failed);

    let state = editor.state().await;
    assert!(state.dirty);
    assert_eq!(state.save_status, SaveStatus::Error);
    editor.close();
  }

  #[tokio::test]
  async fn test_close_stops_autosave_loop() {
    let store = Arc::new(TestStore::default());
    let editor = QuoteEditor::spawn(QuoteDraft::new(), store.clone(), fast_autosave());

    editor.close();
    editor.apply(set_customer("Dana Whitfield")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert!(store.saved().is_empty());
  }
}
