use actix_web::{
  Error,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::adapters::http::errors::{ApiError, AuthErrorKind};
use crate::infrastructure::security::SessionRegistry;

/// Middleware guarding the internal quote tool.
///
/// Checks the bearer token from the Authorization header against the
/// injected session registry and returns 401 when it is missing, expired
/// or revoked. Session state is explicit app state, not a module-level
/// authenticated flag.
pub struct SessionMiddleware {
  sessions: Arc<SessionRegistry>,
}

impl SessionMiddleware {
  pub fn new(sessions: Arc<SessionRegistry>) -> Self {
    Self { sessions }
  }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = SessionMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(SessionMiddlewareService {
      service: Rc::new(service),
      sessions: self.sessions.clone(),
    }))
  }
}

pub struct SessionMiddlewareService<S> {
  service: Rc<S>,
  sessions: Arc<SessionRegistry>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let sessions = self.sessions.clone();

    Box::pin(async move {
      let token = match extract_session_token(&req) {
        Ok(token) => token,
        Err(error) => {
          let (request, _) = req.into_parts();
          let response = error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      if !sessions.validate(&token) {
        let (request, _) = req.into_parts();
        let response = ApiError::Auth(AuthErrorKind::InvalidSession)
          .error_response()
          .map_into_right_body();
        return Ok(ServiceResponse::new(request, response));
      }

      let response = service.call(req).await?;
      Ok(response.map_into_left_body())
    })
  }
}

/// Extract the bearer token from the Authorization header.
pub fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  let header = req
    .headers()
    .get("Authorization")
    .and_then(|value| value.to_str().ok())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))?;

  header
    .strip_prefix("Bearer ")
    .filter(|token| !token.is_empty())
    .map(|token| token.to_string())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_bearer_token() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer abc123"))
      .to_srv_request();
    assert_eq!(extract_session_token(&req).unwrap(), "abc123");
  }

  #[test]
  fn test_missing_or_malformed_header() {
    let req = TestRequest::default().to_srv_request();
    assert!(extract_session_token(&req).is_err());

    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic abc123"))
      .to_srv_request();
    assert!(extract_session_token(&req).is_err());
  }
}
