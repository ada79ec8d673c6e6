use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{QuoteError, QuoteService};

#[derive(Debug)]
pub struct DeleteQuoteCommand {
  pub quote_id: Uuid,
}

pub struct DeleteQuoteUseCase {
  quote_service: Arc<QuoteService>,
}

impl DeleteQuoteUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(&self, command: DeleteQuoteCommand) -> Result<(), QuoteError> {
    self.quote_service.delete_quote(command.quote_id).await
  }
}
