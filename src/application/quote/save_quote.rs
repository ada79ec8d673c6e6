use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{DraftOp, QuoteError, QuoteStatus, SaveOutcome, SaveStatus};

use super::sessions::EditorSessions;

#[derive(Debug, Deserialize)]
pub struct SaveQuoteCommand {
  pub session_id: Uuid,
  /// "Save & Send" also moves the quote to sent.
  #[serde(default)]
  pub mark_sent: bool,
}

#[derive(Debug, Serialize)]
pub struct SaveQuoteResponse {
  pub outcome: &'static str,
  pub quote_number: Option<String>,
  pub save_status: SaveStatus,
  pub dirty: bool,
}

/// Manual save action: same serialize-and-upsert as the quiet-period
/// expiry, bypassing the timer. Failures come back as an outcome value,
/// never as an error.
pub struct SaveQuoteUseCase {
  sessions: Arc<EditorSessions>,
}

impl SaveQuoteUseCase {
  pub fn new(sessions: Arc<EditorSessions>) -> Self {
    Self { sessions }
  }

  pub async fn execute(&self, command: SaveQuoteCommand) -> Result<SaveQuoteResponse, QuoteError> {
    let editor = self.sessions.get(command.session_id).await?;

    if command.mark_sent {
      editor
        .apply(DraftOp::SetStatus {
          status: QuoteStatus::Sent,
        })
        .await?;
    }

    let (outcome, quote_number) = match editor.save_now().await {
      SaveOutcome::Saved { identity } => ("saved", Some(identity.number.into_inner())),
      SaveOutcome::MissingCustomerName => ("missing_customer_name", None),
      SaveOutcome::SaveInFlight => ("save_in_flight", None),
      SaveOutcome::Failed => ("failed", None),
    };

    let state = editor.state().await;
    Ok(SaveQuoteResponse {
      outcome,
      quote_number,
      save_status: state.save_status,
      dirty: state.dirty,
    })
  }
}
