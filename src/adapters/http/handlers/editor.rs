use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::dtos::{OpenSessionRequest, SaveDraftRequest};
use crate::adapters::http::errors::ApiError;
use crate::application::quote::{
  CloseQuoteCommand, CloseQuoteUseCase, EditQuoteCommand, EditQuoteUseCase,
  FetchSuggestionsCommand, FetchSuggestionsUseCase, OpenQuoteCommand, OpenQuoteUseCase,
  SaveQuoteCommand, SaveQuoteUseCase,
};
use crate::application::quote::sessions::EditorSessions;
use crate::domain::quote::DraftOp;

/// Open an editor session (blank, quick package, or existing quote)
/// POST /api/v1/editor/sessions
pub async fn open_session_handler(
  request: web::Json<OpenSessionRequest>,
  use_case: web::Data<Arc<OpenQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let response = use_case
    .execute(OpenQuoteCommand {
      quote_id: request.quote_id,
      package: request.package,
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}

/// Read the current editor state
/// GET /api/v1/editor/sessions/:session_id
pub async fn get_session_handler(
  session_id: web::Path<Uuid>,
  sessions: web::Data<Arc<EditorSessions>>,
) -> Result<HttpResponse, ApiError> {
  let editor = sessions.get(*session_id).await?;
  Ok(HttpResponse::Ok().json(editor.state().await))
}

/// Apply one draft mutation
/// POST /api/v1/editor/sessions/:session_id/ops
pub async fn apply_op_handler(
  session_id: web::Path<Uuid>,
  op: web::Json<DraftOp>,
  use_case: web::Data<Arc<EditQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(EditQuoteCommand {
      session_id: *session_id,
      op: op.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Manual save ("Save Draft" / "Save & Send")
/// POST /api/v1/editor/sessions/:session_id/save
pub async fn save_draft_handler(
  session_id: web::Path<Uuid>,
  request: web::Json<SaveDraftRequest>,
  use_case: web::Data<Arc<SaveQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(SaveQuoteCommand {
      session_id: *session_id,
      mark_sent: request.mark_sent,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Upload a job-site photo and get line-item suggestions for review
/// POST /api/v1/editor/sessions/:session_id/suggestions
pub async fn fetch_suggestions_handler(
  session_id: web::Path<Uuid>,
  mut payload: Multipart,
  sessions: web::Data<Arc<EditorSessions>>,
  use_case: web::Data<Arc<FetchSuggestionsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // The report is reviewed against this session before being accepted.
  sessions.get(*session_id).await?;

  let mut image: Vec<u8> = Vec::new();
  let mut content_type = "application/octet-stream".to_string();

  while let Some(mut field) = payload
    .try_next()
    .await
    .map_err(|e| ApiError::Validation(format!("Malformed multipart payload: {}", e)))?
  {
    if field.name() != Some("photo") {
      continue;
    }
    if let Some(mime) = field.content_type() {
      content_type = mime.to_string();
    }
    while let Some(chunk) = field
      .try_next()
      .await
      .map_err(|e| ApiError::Validation(format!("Failed to read photo: {}", e)))?
    {
      image.extend_from_slice(&chunk);
    }
  }

  if image.is_empty() {
    return Err(ApiError::Validation(
      "Multipart field 'photo' is required".to_string(),
    ));
  }

  let report = use_case
    .execute(FetchSuggestionsCommand {
      image,
      content_type,
    })
    .await?;

  Ok(HttpResponse::Ok().json(report))
}

/// Close an editor session, cancelling its autosave timer
/// DELETE /api/v1/editor/sessions/:session_id
pub async fn close_session_handler(
  session_id: web::Path<Uuid>,
  use_case: web::Data<Arc<CloseQuoteUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(CloseQuoteCommand {
      session_id: *session_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Session closed" })))
}
