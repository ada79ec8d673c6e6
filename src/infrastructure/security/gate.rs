use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::config::SecurityConfig;

use super::password::SharedPasswordVerifier;
use super::sessions::SessionRegistry;
use super::GateError;

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginGrant {
  pub token: String,
  pub expires_in_seconds: u64,
}

/// Access gate for the internal quote tool.
///
/// The tool uses one shared crew password; what each login gets is its
/// own session token with a TTL. The registry is injected so tests and
/// the request pipeline share the same explicit state.
pub struct AccessGate {
  verifier: SharedPasswordVerifier,
  password_hash: String,
  sessions: Arc<SessionRegistry>,
  session_ttl_seconds: u64,
}

impl AccessGate {
  pub fn new(config: &SecurityConfig) -> Result<(Self, Arc<SessionRegistry>), GateError> {
    let sessions = Arc::new(SessionRegistry::new(Duration::from_secs(
      config.session_ttl_seconds,
    )));
    let gate = Self {
      verifier: SharedPasswordVerifier::new()?,
      password_hash: config.password_hash.clone(),
      sessions: sessions.clone(),
      session_ttl_seconds: config.session_ttl_seconds,
    };
    Ok((gate, sessions))
  }

  /// Verify the shared password; a match issues a session token.
  pub fn login(&self, password: &str) -> Result<Option<LoginGrant>, GateError> {
    if !self.verifier.verify(password, &self.password_hash)? {
      tracing::warn!("Rejected tool login attempt");
      return Ok(None);
    }

    Ok(Some(LoginGrant {
      token: self.sessions.issue(),
      expires_in_seconds: self.session_ttl_seconds,
    }))
  }

  pub fn logout(&self, token: &str) {
    self.sessions.revoke(token);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gate() -> (AccessGate, Arc<SessionRegistry>) {
    let verifier = SharedPasswordVerifier::new().unwrap();
    let config = SecurityConfig {
      password_hash: verifier.hash("crew-access-2024").unwrap(),
      session_ttl_seconds: 60,
    };
    AccessGate::new(&config).unwrap()
  }

  #[test]
  fn test_login_issues_registered_session() {
    let (gate, sessions) = gate();
    let grant = gate.login("crew-access-2024").unwrap().unwrap();
    assert!(sessions.validate(&grant.token));

    gate.logout(&grant.token);
    assert!(!sessions.validate(&grant.token));
  }

  #[test]
  fn test_wrong_password_gets_no_session() {
    let (gate, _) = gate();
    assert!(gate.login("nope").unwrap().is_none());
  }
}
