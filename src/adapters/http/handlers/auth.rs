use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::dtos::{LoginRequest, LoginResponse};
use crate::adapters::http::errors::{ApiError, AuthErrorKind};
use crate::infrastructure::security::AccessGate;

/// Log in with the shared tool password
/// POST /api/v1/auth/login
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  gate: web::Data<Arc<AccessGate>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let grant = gate
    .login(&request.password)
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidCredentials))?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    token: grant.token,
    expires_in_seconds: grant.expires_in_seconds,
  }))
}

/// Revoke the current session
/// POST /api/v1/auth/logout
pub async fn logout_handler(
  http_req: HttpRequest,
  gate: web::Data<Arc<AccessGate>>,
) -> Result<HttpResponse, ApiError> {
  let token = http_req
    .headers()
    .get("Authorization")
    .and_then(|value| value.to_str().ok())
    .and_then(|header| header.strip_prefix("Bearer "))
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))?;

  gate.logout(token);
  Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" })))
}
