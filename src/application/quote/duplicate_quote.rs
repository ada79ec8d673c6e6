use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{QuoteError, QuoteService};

#[derive(Debug)]
pub struct DuplicateQuoteCommand {
  pub quote_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DuplicateQuoteResponse {
  pub id: Uuid,
  pub quote_number: String,
  pub status: String,
}

pub struct DuplicateQuoteUseCase {
  quote_service: Arc<QuoteService>,
}

impl DuplicateQuoteUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(
    &self,
    command: DuplicateQuoteCommand,
  ) -> Result<DuplicateQuoteResponse, QuoteError> {
    let (identity, record) = self.quote_service.duplicate_quote(command.quote_id).await?;

    Ok(DuplicateQuoteResponse {
      id: identity.id,
      quote_number: identity.number.into_inner(),
      status: record.status.as_str().to_string(),
    })
  }
}
