use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quote::{
  ExportLineRow, QuoteDraft, QuoteError, QuoteExportView, QuoteNotification, QuoteNotifier,
  QuotePdfRenderer, QuoteService, QuoteStatus,
};
use crate::infrastructure::config::CompanyConfig;

#[derive(Debug)]
pub struct ExportQuoteCommand {
  pub quote_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ExportQuoteResponse {
  pub quote_number: String,
  pub pdf_path: String,
  pub total: Decimal,
  pub notified: bool,
}

/// Finalize a persisted quote into its two artifacts: the fixed-layout
/// PDF and the outbound notification. One export view is built with the
/// totals computed exactly once; both artifacts read from it, so the
/// exported figures cannot disagree with the on-screen figures.
pub struct ExportQuoteUseCase {
  quote_service: Arc<QuoteService>,
  pdf_renderer: Arc<dyn QuotePdfRenderer>,
  notifier: Arc<dyn QuoteNotifier>,
  company: CompanyConfig,
  base_url: String,
}

impl ExportQuoteUseCase {
  pub fn new(
    quote_service: Arc<QuoteService>,
    pdf_renderer: Arc<dyn QuotePdfRenderer>,
    notifier: Arc<dyn QuoteNotifier>,
    company: CompanyConfig,
    base_url: String,
  ) -> Self {
    Self {
      quote_service,
      pdf_renderer,
      notifier,
      company,
      base_url,
    }
  }

  pub async fn execute(&self, command: ExportQuoteCommand) -> Result<ExportQuoteResponse, QuoteError> {
    let record = self.quote_service.get_quote(command.quote_id).await?;
    let draft = QuoteDraft::from_record(record)?;
    let identity = draft.identity.clone().ok_or(QuoteError::NotPersisted)?;

    let view = self.build_view(&draft, identity.id, identity.number.value());

    let pdf_path = self.pdf_renderer.render_quote_pdf(&view).await?;

    // Notification failure leaves the quote unsent; it never undoes the
    // PDF nor crashes the export.
    let notified = if view.customer_email.trim().is_empty() {
      tracing::debug!(quote_number = %view.quote_number, "No recipient email; skipping notification");
      false
    } else {
      let notification = QuoteNotification {
        recipient_email: view.customer_email.clone(),
        recipient_name: view.customer_name.clone(),
        quote_number: view.quote_number.clone(),
        total: view.totals.pricing.total.value(),
        quote_url: view.quote_url.clone(),
      };
      match self.notifier.send_quote(&notification).await {
        Ok(()) => true,
        Err(error) => {
          tracing::warn!(quote_number = %view.quote_number, "Notification failed: {}", error);
          false
        }
      }
    };

    if notified {
      if let Err(error) = self
        .quote_service
        .change_status(identity.id, QuoteStatus::Sent)
        .await
      {
        tracing::warn!("Failed to mark quote sent after export: {}", error);
      }
    }

    Ok(ExportQuoteResponse {
      quote_number: view.quote_number,
      pdf_path: pdf_path.to_string_lossy().to_string(),
      total: view.totals.pricing.total.value(),
      notified,
    })
  }

  fn build_view(&self, draft: &QuoteDraft, quote_id: Uuid, quote_number: &str) -> QuoteExportView {
    let totals = draft.totals();

    QuoteExportView {
      company_name: self.company.name.clone(),
      company_email: self.company.email.clone(),
      company_phone: self.company.phone.clone(),
      company_address: self.company.address.clone(),
      terms_text: self.company.terms_text.clone(),
      quote_id,
      quote_number: quote_number.to_string(),
      customer_name: draft.customer.name.clone(),
      customer_email: draft.customer.email.clone(),
      customer_phone: draft.customer.phone.clone(),
      customer_address: draft.customer.address.clone(),
      line_items: draft
        .line_items
        .iter()
        .map(|item| ExportLineRow {
          name: item.name.clone(),
          quantity: item.quantity.value(),
          unit_label: item.unit_label.clone(),
          unit_price: item.unit_price.value(),
          subtotal: item.subtotal.value(),
        })
        .collect(),
      totals,
      notes: draft.notes.clone(),
      quote_url: format!("{}/quotes/{}", self.base_url.trim_end_matches('/'), quote_id),
    }
  }
}
