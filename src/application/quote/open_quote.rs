use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{
  EditorState, QuickPackage, QuoteDraft, QuoteError, QuoteService,
};

use super::sessions::EditorSessions;

#[derive(Debug, Deserialize)]
pub struct OpenQuoteCommand {
  /// Re-open an already persisted quote for editing.
  pub quote_id: Option<Uuid>,
  /// Pre-populate a fresh draft from a quick-package template.
  pub package: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OpenQuoteResponse {
  pub session_id: Uuid,
  #[serde(flatten)]
  pub state: EditorState,
}

pub struct OpenQuoteUseCase {
  sessions: Arc<EditorSessions>,
  quote_service: Arc<QuoteService>,
}

impl OpenQuoteUseCase {
  pub fn new(sessions: Arc<EditorSessions>, quote_service: Arc<QuoteService>) -> Self {
    Self {
      sessions,
      quote_service,
    }
  }

  pub async fn execute(&self, command: OpenQuoteCommand) -> Result<OpenQuoteResponse, QuoteError> {
    let draft = match (command.quote_id, command.package) {
      (Some(quote_id), _) => {
        let record = self.quote_service.get_quote(quote_id).await?;
        QuoteDraft::from_record(record)?
      }
      (None, Some(package)) => QuickPackage::find(&package)
        .ok_or(QuoteError::UnknownPackage(package))?
        .new_draft()?,
      (None, None) => QuoteDraft::new(),
    };

    let (session_id, editor) = self.sessions.open(draft).await;
    Ok(OpenQuoteResponse {
      session_id,
      state: editor.state().await,
    })
  }
}
