use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::token::{generate_token, token_hash};

/// In-memory registry of tool sessions.
///
/// Session state is explicit and injected into the request pipeline via
/// app state rather than living in a module-level "authenticated" flag,
/// so it can be constructed fresh per test.
pub struct SessionRegistry {
  sessions: Mutex<HashMap<String, Instant>>,
  ttl: Duration,
}

impl SessionRegistry {
  pub fn new(ttl: Duration) -> Self {
    Self {
      sessions: Mutex::new(HashMap::new()),
      ttl,
    }
  }

  /// Issue a new session and return the bearer token.
  pub fn issue(&self) -> String {
    let token = generate_token();
    let mut sessions = self.sessions.lock().expect("session lock poisoned");
    sessions.insert(token_hash(&token), Instant::now() + self.ttl);
    token
  }

  /// Check a bearer token, pruning expired sessions as a side effect.
  pub fn validate(&self, token: &str) -> bool {
    let now = Instant::now();
    let mut sessions = self.sessions.lock().expect("session lock poisoned");
    sessions.retain(|_, expires_at| *expires_at > now);
    sessions.contains_key(&token_hash(token))
  }

  pub fn revoke(&self, token: &str) {
    let mut sessions = self.sessions.lock().expect("session lock poisoned");
    sessions.remove(&token_hash(token));
  }
}
