use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{DraftOp, QuoteError, QuoteTotals, SaveStatus};

use super::sessions::EditorSessions;

#[derive(Debug)]
pub struct EditQuoteCommand {
  pub session_id: Uuid,
  pub op: DraftOp,
}

#[derive(Debug, Serialize)]
pub struct EditQuoteResponse {
  pub totals: QuoteTotals,
  pub save_status: SaveStatus,
  pub dirty: bool,
}

/// Single entrypoint for draft mutations. Totals come back recomputed so
/// the UI always shows figures derived from the current base values.
pub struct EditQuoteUseCase {
  sessions: Arc<EditorSessions>,
}

impl EditQuoteUseCase {
  pub fn new(sessions: Arc<EditorSessions>) -> Self {
    Self { sessions }
  }

  pub async fn execute(&self, command: EditQuoteCommand) -> Result<EditQuoteResponse, QuoteError> {
    let editor = self.sessions.get(command.session_id).await?;
    let totals = editor.apply(command.op).await?;
    let state = editor.state().await;

    Ok(EditQuoteResponse {
      totals,
      save_status: state.save_status,
      dirty: state.dirty,
    })
  }
}
