use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::QuoteError;

use super::sessions::EditorSessions;

#[derive(Debug)]
pub struct CloseQuoteCommand {
  pub session_id: Uuid,
}

/// Tear down an editing session. The editor's quiet-period timer is
/// cancelled so nothing writes to a disposed draft.
pub struct CloseQuoteUseCase {
  sessions: Arc<EditorSessions>,
}

impl CloseQuoteUseCase {
  pub fn new(sessions: Arc<EditorSessions>) -> Self {
    Self { sessions }
  }

  pub async fn execute(&self, command: CloseQuoteCommand) -> Result<(), QuoteError> {
    self.sessions.close(command.session_id).await
  }
}
