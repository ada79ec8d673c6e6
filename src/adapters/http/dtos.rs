use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Standard error payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub expires_in_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
  /// Re-open an existing quote by id.
  pub quote_id: Option<Uuid>,
  /// Start from a quick-package template.
  pub package: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
  #[serde(default)]
  pub mark_sent: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeStatusRequest {
  #[validate(length(min = 1, message = "Status is required"))]
  pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct QuoteListQuery {
  pub status: Option<String>,
}
