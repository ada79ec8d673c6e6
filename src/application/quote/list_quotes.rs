use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{QuoteError, QuoteService, QuoteStatus};

#[derive(Debug, Default)]
pub struct ListQuotesCommand {
  pub status: Option<QuoteStatus>,
}

#[derive(Debug, Serialize)]
pub struct QuoteSummaryDto {
  pub id: Uuid,
  pub quote_number: Option<String>,
  pub customer_name: String,
  pub status: String,
  /// The grand total as last computed at save time; listings show the
  /// historical figure without replaying the pricing rules.
  pub grand_total: Decimal,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ListQuotesResponse {
  pub quotes: Vec<QuoteSummaryDto>,
}

pub struct ListQuotesUseCase {
  quote_service: Arc<QuoteService>,
}

impl ListQuotesUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(&self, command: ListQuotesCommand) -> Result<ListQuotesResponse, QuoteError> {
    let records = self.quote_service.list_quotes(command.status).await?;

    let quotes = records
      .into_iter()
      .filter_map(|record| {
        let id = record.id?;
        Some(QuoteSummaryDto {
          id,
          quote_number: record.quote_number,
          customer_name: record.customer.name,
          status: record.status.as_str().to_string(),
          grand_total: record.grand_total.value(),
          updated_at: record.updated_at,
        })
      })
      .collect();

    Ok(ListQuotesResponse { quotes })
  }
}
