use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash, PasswordHasher as Argon2PasswordHasherTrait, PasswordVerifier, SaltString,
  },
};

use super::GateError;

/// Argon2id verifier for the shared tool password
///
/// Uses the Argon2id algorithm with secure parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
pub struct SharedPasswordVerifier {
  argon2: Argon2<'static>,
}

impl SharedPasswordVerifier {
  pub fn new() -> Result<Self, GateError> {
    let params = Params::new(19456, 2, 1, Some(32))
      .map_err(|e| GateError::Hash(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }

  /// Hash a password for storage in configuration.
  pub fn hash(&self, password: &str) -> Result<String, GateError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let hash = self
      .argon2
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| GateError::Hash(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
  }

  /// Verify a login attempt against the configured hash. Comparison is
  /// constant-time inside argon2's verify_password.
  pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, GateError> {
    let parsed = PasswordHash::new(stored_hash)
      .map_err(|e| GateError::Hash(format!("Invalid stored hash: {}", e)))?;

    match self.argon2.verify_password(password.as_bytes(), &parsed) {
      Ok(_) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(GateError::Hash(format!("Verification failed: {}", e))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_verify_correct_password() {
    let verifier = SharedPasswordVerifier::new().unwrap();
    let hash = verifier.hash("crew-access-2024").unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(verifier.verify("crew-access-2024", &hash).unwrap());
  }

  #[test]
  fn test_verify_wrong_password() {
    let verifier = SharedPasswordVerifier::new().unwrap();
    let hash = verifier.hash("crew-access-2024").unwrap();
    assert!(!verifier.verify("wrong", &hash).unwrap());
  }

  #[test]
  fn test_invalid_stored_hash() {
    let verifier = SharedPasswordVerifier::new().unwrap();
    assert!(verifier.verify("anything", "not-a-hash").is_err());
  }
}
