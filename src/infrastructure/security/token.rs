use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a 32-byte session token from the OS's cryptographically
/// secure RNG, hex-encoded for safe transport in headers.
pub fn generate_token() -> String {
  let mut bytes = [0u8; 32];
  rand::rngs::OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

/// Registry entries hold the SHA-256 of the token, never the token.
pub fn token_hash(token: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(token.as_bytes());
  hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokens_are_unique_and_hex() {
    let a = generate_token();
    let b = generate_token();
    assert_ne!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn test_hash_is_stable() {
    let token = generate_token();
    assert_eq!(token_hash(&token), token_hash(&token));
    assert_ne!(token_hash(&token), token);
  }
}
