use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::quote::{
  QuoteError, QuoteIdentity, QuoteNumber, QuoteRecord, QuoteStatus, QuoteStore,
};
use crate::infrastructure::config::StoreConfig;

/// Remote quote store over plain REST. The backend owns identity
/// allocation: an insert response carries the record id and the
/// human-readable quote number.
pub struct HttpQuoteStore {
  client: Client,
  base_url: String,
  api_key: String,
}

#[derive(Debug, Deserialize)]
struct UpsertResponse {
  id: Uuid,
  quote_number: String,
}

impl HttpQuoteStore {
  pub fn new(config: &StoreConfig) -> Result<Self, QuoteError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_seconds))
      .build()
      .map_err(|e| QuoteError::Store(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key: config.api_key.clone(),
    })
  }

  fn quotes_url(&self) -> String {
    format!("{}/quotes", self.base_url)
  }

  fn quote_url(&self, id: Uuid) -> String {
    format!("{}/quotes/{}", self.base_url, id)
  }

  async fn check(&self, response: reqwest::Response, action: &str) -> Result<reqwest::Response, QuoteError> {
    if response.status().is_success() {
      return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(QuoteError::Store(format!(
      "{} failed with {}: {}",
      action, status, body
    )))
  }
}

#[async_trait]
impl QuoteStore for HttpQuoteStore {
  async fn upsert(&self, record: QuoteRecord) -> Result<QuoteIdentity, QuoteError> {
    let request = match record.id {
      Some(id) => self.client.put(self.quote_url(id)),
      None => self.client.post(self.quotes_url()),
    };

    let response = request
      .header("x-api-key", &self.api_key)
      .json(&record)
      .send()
      .await
      .map_err(|e| QuoteError::Store(format!("Upsert request failed: {}", e)))?;
    let response = self.check(response, "Upsert").await?;

    let body: UpsertResponse = response
      .json()
      .await
      .map_err(|e| QuoteError::Store(format!("Malformed upsert response: {}", e)))?;

    Ok(QuoteIdentity {
      id: body.id,
      number: QuoteNumber::new(body.quote_number)?,
    })
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<QuoteRecord>, QuoteError> {
    let response = self
      .client
      .get(self.quote_url(id))
      .header("x-api-key", &self.api_key)
      .send()
      .await
      .map_err(|e| QuoteError::Store(format!("Read request failed: {}", e)))?;

    if response.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    let response = self.check(response, "Read").await?;

    let record: QuoteRecord = response
      .json()
      .await
      .map_err(|e| QuoteError::Store(format!("Malformed quote record: {}", e)))?;
    Ok(Some(record))
  }

  async fn delete(&self, id: Uuid) -> Result<(), QuoteError> {
    let response = self
      .client
      .delete(self.quote_url(id))
      .header("x-api-key", &self.api_key)
      .send()
      .await
      .map_err(|e| QuoteError::Store(format!("Delete request failed: {}", e)))?;
    self.check(response, "Delete").await?;
    Ok(())
  }

  async fn list(&self, status: Option<QuoteStatus>) -> Result<Vec<QuoteRecord>, QuoteError> {
    let mut request = self
      .client
      .get(self.quotes_url())
      .header("x-api-key", &self.api_key);
    if let Some(status) = status {
      request = request.query(&[("status", status.as_str())]);
    }

    let response = request
      .send()
      .await
      .map_err(|e| QuoteError::Store(format!("List request failed: {}", e)))?;
    let response = self.check(response, "List").await?;

    response
      .json()
      .await
      .map_err(|e| QuoteError::Store(format!("Malformed quote list: {}", e)))
  }
}
