use actix_web::{HttpResponse, web};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::dtos::{ChangeStatusRequest, QuoteListQuery};
use crate::adapters::http::errors::ApiError;
use crate::application::quote::{
  ChangeQuoteStatusCommand, ChangeQuoteStatusUseCase, DeleteQuoteCommand, DeleteQuoteUseCase,
  DuplicateQuoteCommand, DuplicateQuoteUseCase, ExportQuoteCommand, ExportQuoteUseCase,
  GetQuoteDetailsCommand, GetQuoteDetailsUseCase, ListQuotesCommand, ListQuotesUseCase,
};
use crate::domain::quote::QuoteStatus;

/// List quotes, optionally filtered by status
/// GET /api/v1/quotes?status=sent
pub async fn list_quotes_handler(
  query: web::Query<QuoteListQuery>,
  use_case: web::Data<Arc<ListQuotesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let status = query
    .status
    .as_deref()
    .map(QuoteStatus::from_str)
    .transpose()
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  let response = use_case.execute(ListQuotesCommand { status }).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Get one quote with computed totals
/// GET /api/v1/quotes/:quote_id
pub async fn get_quote_handler(
  quote_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetQuoteDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(GetQuoteDetailsCommand {
      quote_id: *quote_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Delete a quote
/// DELETE /api/v1/quotes/:quote_id
pub async fn delete_quote_handler(
  quote_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteQuoteCommand {
      quote_id: *quote_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Quote deleted" })))
}

/// Duplicate a quote into a fresh draft with a new identity
/// POST /api/v1/quotes/:quote_id/duplicate
pub async fn duplicate_quote_handler(
  quote_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DuplicateQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(DuplicateQuoteCommand {
      quote_id: *quote_id,
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}

/// Set a quote's status (any direction)
/// POST /api/v1/quotes/:quote_id/status
pub async fn change_status_handler(
  quote_id: web::Path<Uuid>,
  request: web::Json<ChangeStatusRequest>,
  use_case: web::Data<Arc<ChangeQuoteStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let status =
    QuoteStatus::from_str(&request.status).map_err(|e| ApiError::Validation(e.to_string()))?;

  let response = use_case
    .execute(ChangeQuoteStatusCommand {
      quote_id: *quote_id,
      status,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Export the finalized quote: PDF plus outbound notification
/// POST /api/v1/quotes/:quote_id/export
pub async fn export_quote_handler(
  quote_id: web::Path<Uuid>,
  use_case: web::Data<Arc<ExportQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(ExportQuoteCommand {
      quote_id: *quote_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}
