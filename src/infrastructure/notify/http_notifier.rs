use async_trait::async_trait;
use reqwest::Client;

use crate::domain::quote::{QuoteError, QuoteNotification, QuoteNotifier};
use crate::infrastructure::config::NotifyConfig;

/// Delivers the outbound quote notification to the configured delivery
/// endpoint. The core only learns success or failure; provider details
/// stay behind this adapter.
pub struct HttpNotifier {
  client: Client,
  endpoint: String,
  api_key: Option<String>,
}

impl HttpNotifier {
  pub fn new(config: &NotifyConfig) -> Self {
    Self {
      client: Client::new(),
      endpoint: config.endpoint.clone(),
      api_key: config.api_key.clone(),
    }
  }
}

#[async_trait]
impl QuoteNotifier for HttpNotifier {
  async fn send_quote(&self, notification: &QuoteNotification) -> Result<(), QuoteError> {
    let mut request = self.client.post(&self.endpoint).json(notification);
    if let Some(api_key) = &self.api_key {
      request = request.header("x-api-key", api_key);
    }

    let response = request
      .send()
      .await
      .map_err(|e| QuoteError::Notification(format!("Delivery request failed: {}", e)))?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(QuoteError::Notification(format!(
        "Delivery endpoint returned {}: {}",
        status, body
      )));
    }

    tracing::info!(
      quote_number = %notification.quote_number,
      recipient = %notification.recipient_email,
      "Quote notification delivered"
    );
    Ok(())
  }
}
