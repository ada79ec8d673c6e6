use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use super::entities::{QuoteIdentity, QuoteRecord, QuoteTotals};
use super::errors::QuoteError;
use super::value_objects::QuoteStatus;

/// Remote quote store. The core issues exactly these four operation
/// shapes and never embeds storage logic itself. `upsert` inserts when the
/// record carries no id and updates otherwise; on insert the store
/// allocates and returns the durable identity.
#[async_trait]
pub trait QuoteStore: Send + Sync {
  async fn upsert(&self, record: QuoteRecord) -> Result<QuoteIdentity, QuoteError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<QuoteRecord>, QuoteError>;
  async fn delete(&self, id: Uuid) -> Result<(), QuoteError>;
  async fn list(&self, status: Option<QuoteStatus>) -> Result<Vec<QuoteRecord>, QuoteError>;
}

/// Outbound notification payload. Figures are taken from the export view;
/// the notifier performs no recalculation.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteNotification {
  pub recipient_email: String,
  pub recipient_name: String,
  pub quote_number: String,
  pub total: Decimal,
  pub quote_url: String,
}

#[async_trait]
pub trait QuoteNotifier: Send + Sync {
  async fn send_quote(&self, notification: &QuoteNotification) -> Result<(), QuoteError>;
}

/// One structured suggestion from the photo analysis collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedItem {
  pub name: String,
  pub quantity: Decimal,
  pub unit: String,
  pub reason: String,
}

/// Suggestion response. A payload that fails structured parsing is
/// degraded by the adapter to a plain-text `summary` with no items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionReport {
  pub summary: String,
  pub items: Vec<SuggestedItem>,
  pub labor_hours_range: Option<(Decimal, Decimal)>,
}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
  async fn suggest_from_photo(
    &self,
    image: Vec<u8>,
    content_type: &str,
  ) -> Result<SuggestionReport, QuoteError>;
}

/// Read-only export snapshot consumed by the PDF renderer and the
/// notification payload builder. Totals are computed exactly once when the
/// view is built; neither artifact recalculates them.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteExportView {
  pub company_name: String,
  pub company_email: String,
  pub company_phone: String,
  pub company_address: String,
  pub terms_text: String,
  pub quote_id: Uuid,
  pub quote_number: String,
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: String,
  pub customer_address: String,
  pub line_items: Vec<ExportLineRow>,
  pub totals: QuoteTotals,
  pub notes: String,
  pub quote_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportLineRow {
  pub name: String,
  pub quantity: Decimal,
  pub unit_label: String,
  pub unit_price: Decimal,
  pub subtotal: Decimal,
}

#[async_trait]
pub trait QuotePdfRenderer: Send + Sync {
  /// Render the paginated fixed-layout document and return the path of
  /// the generated file.
  async fn render_quote_pdf(&self, view: &QuoteExportView) -> Result<PathBuf, QuoteError>;
}
