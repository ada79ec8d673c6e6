use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{QuoteError, QuoteService, QuoteStatus};

#[derive(Debug)]
pub struct ChangeQuoteStatusCommand {
  pub quote_id: Uuid,
  pub status: QuoteStatus,
}

#[derive(Debug, Serialize)]
pub struct ChangeQuoteStatusResponse {
  pub id: Uuid,
  pub status: String,
}

pub struct ChangeQuoteStatusUseCase {
  quote_service: Arc<QuoteService>,
}

impl ChangeQuoteStatusUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(
    &self,
    command: ChangeQuoteStatusCommand,
  ) -> Result<ChangeQuoteStatusResponse, QuoteError> {
    let record = self
      .quote_service
      .change_status(command.quote_id, command.status)
      .await?;

    Ok(ChangeQuoteStatusResponse {
      id: command.quote_id,
      status: record.status.as_str().to_string(),
    })
  }
}
