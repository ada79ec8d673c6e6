use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum QuoteError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Quote not found: {0}")]
  QuoteNotFound(Uuid),

  #[error("Editor session not found: {0}")]
  SessionNotFound(Uuid),

  #[error("Line item not found: {0}")]
  LineItemNotFound(Uuid),

  #[error("Catalog items keep the name they were added with: {0}")]
  CannotRenameCatalogItem(Uuid),

  #[error("Quote has not been persisted yet")]
  NotPersisted,

  #[error("Unknown quick package: {0}")]
  UnknownPackage(String),

  #[error("Remote store error: {0}")]
  Store(String),

  #[error("Notification delivery failed: {0}")]
  Notification(String),

  #[error("Suggestion request failed: {0}")]
  Suggestion(String),

  #[error("PDF generation failed: {0}")]
  PdfGenerationFailed(String),

  #[error("Internal error: {0}")]
  Internal(String),
}
