use async_trait::async_trait;

use crate::domain::quote::{QuoteError, QuoteNotification, QuoteNotifier};

/// No-operation notifier
/// Used when no delivery endpoint is configured
pub struct NoOpNotifier;

impl NoOpNotifier {
  pub fn new() -> Self {
    Self
  }
}

impl Default for NoOpNotifier {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl QuoteNotifier for NoOpNotifier {
  async fn send_quote(&self, notification: &QuoteNotification) -> Result<(), QuoteError> {
    tracing::debug!(
      quote_number = %notification.quote_number,
      "NoOpNotifier: skipping delivery (no notification endpoint configured)"
    );
    Ok(())
  }
}
