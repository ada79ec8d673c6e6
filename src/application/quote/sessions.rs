use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::quote::{AutosaveConfig, QuoteDraft, QuoteEditor, QuoteError, QuoteStore};

/// Registry of live editing sessions, one editor per open draft.
///
/// A single logical editor owns each draft; the registry only hands out
/// the editor, which serializes its own mutations internally. Closing a
/// session cancels the editor's autosave loop before dropping it.
pub struct EditorSessions {
  store: Arc<dyn QuoteStore>,
  autosave: AutosaveConfig,
  sessions: RwLock<HashMap<Uuid, Arc<QuoteEditor>>>,
}

impl EditorSessions {
  pub fn new(store: Arc<dyn QuoteStore>, autosave: AutosaveConfig) -> Self {
    Self {
      store,
      autosave,
      sessions: RwLock::new(HashMap::new()),
    }
  }

  pub async fn open(&self, draft: QuoteDraft) -> (Uuid, Arc<QuoteEditor>) {
    let session_id = Uuid::new_v4();
    let editor = QuoteEditor::spawn(draft, self.store.clone(), self.autosave.clone());
    self
      .sessions
      .write()
      .await
      .insert(session_id, editor.clone());
    tracing::debug!(%session_id, "Editor session opened");
    (session_id, editor)
  }

  pub async fn get(&self, session_id: Uuid) -> Result<Arc<QuoteEditor>, QuoteError> {
    self
      .sessions
      .read()
      .await
      .get(&session_id)
      .cloned()
      .ok_or(QuoteError::SessionNotFound(session_id))
  }

  pub async fn close(&self, session_id: Uuid) -> Result<(), QuoteError> {
    let editor = self
      .sessions
      .write()
      .await
      .remove(&session_id)
      .ok_or(QuoteError::SessionNotFound(session_id))?;
    editor.close();
    tracing::debug!(%session_id, "Editor session closed");
    Ok(())
  }
}
