pub mod gate;
pub mod password;
pub mod sessions;
pub mod token;

pub use gate::{AccessGate, LoginGrant};
pub use password::SharedPasswordVerifier;
pub use sessions::SessionRegistry;

#[derive(Debug, thiserror::Error)]
pub enum GateError {
  #[error("Hash error: {0}")]
  Hash(String),
}
