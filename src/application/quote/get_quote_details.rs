use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{QuoteDraft, QuoteError, QuoteService};

#[derive(Debug)]
pub struct GetQuoteDetailsCommand {
  pub quote_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct QuoteLineItemDto {
  pub id: Uuid,
  pub source_ref: Option<String>,
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub unit_label: String,
  pub subtotal: Decimal,
}

#[derive(Debug, Serialize)]
pub struct QuoteTotalsDto {
  pub materials_subtotal: Decimal,
  pub labor_total: Decimal,
  pub markup_amount: Decimal,
  pub tier_materials: Decimal,
  pub tier_labor: Decimal,
  pub tier_markup: Decimal,
  pub grand_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailsDto {
  pub customer_id: Option<Uuid>,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteDetailsResponse {
  pub id: Uuid,
  pub quote_number: String,
  pub customer: CustomerDetailsDto,
  pub line_items: Vec<QuoteLineItemDto>,
  pub labor_hours: Decimal,
  pub labor_rate: Decimal,
  pub markup_percent: Decimal,
  pub pricing_tier: String,
  pub status: String,
  pub notes: String,
  pub totals: QuoteTotalsDto,
  pub updated_at: DateTime<Utc>,
}

/// Fetch one persisted quote with its figures computed once from the base
/// values; the export pipeline reuses this response untouched.
pub struct GetQuoteDetailsUseCase {
  quote_service: Arc<QuoteService>,
}

impl GetQuoteDetailsUseCase {
  pub fn new(quote_service: Arc<QuoteService>) -> Self {
    Self { quote_service }
  }

  pub async fn execute(
    &self,
    command: GetQuoteDetailsCommand,
  ) -> Result<QuoteDetailsResponse, QuoteError> {
    let record = self.quote_service.get_quote(command.quote_id).await?;
    let updated_at = record.updated_at;
    let draft = QuoteDraft::from_record(record)?;

    let identity = draft.identity.clone().ok_or(QuoteError::NotPersisted)?;
    let totals = draft.totals();

    let line_items = draft
      .line_items
      .iter()
      .map(|item| QuoteLineItemDto {
        id: item.id,
        source_ref: item.source_ref.clone(),
        name: item.name.clone(),
        quantity: item.quantity.value(),
        unit_price: item.unit_price.value(),
        unit_label: item.unit_label.clone(),
        subtotal: item.subtotal.value(),
      })
      .collect();

    Ok(QuoteDetailsResponse {
      id: identity.id,
      quote_number: identity.number.into_inner(),
      customer: CustomerDetailsDto {
        customer_id: draft.customer.customer_id,
        name: draft.customer.name.clone(),
        email: draft.customer.email.clone(),
        phone: draft.customer.phone.clone(),
        address: draft.customer.address.clone(),
      },
      line_items,
      labor_hours: draft.labor_hours.value(),
      labor_rate: draft.labor_rate.value(),
      markup_percent: draft.markup_percent.value(),
      pricing_tier: draft.pricing_tier.as_str().to_string(),
      status: draft.status.as_str().to_string(),
      notes: draft.notes.clone(),
      totals: QuoteTotalsDto {
        materials_subtotal: totals.materials_subtotal.value(),
        labor_total: totals.labor_total.value(),
        markup_amount: totals.markup_amount.value(),
        tier_materials: totals.pricing.materials.value(),
        tier_labor: totals.pricing.labor.value(),
        tier_markup: totals.pricing.markup.value(),
        grand_total: totals.pricing.total.value(),
      },
      updated_at,
    })
  }
}
