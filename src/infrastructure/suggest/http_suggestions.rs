use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::quote::{QuoteError, SuggestedItem, SuggestionProvider, SuggestionReport};
use crate::infrastructure::config::SuggestionsConfig;

/// Photo analysis collaborator: uploads a job-site photo and maps the
/// structured response into a suggestion report. A response that fails
/// structured parsing degrades to a plain-text summary with no items
/// rather than surfacing a hard failure.
pub struct HttpSuggestionProvider {
  client: Client,
  endpoint: String,
  api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireReport {
  #[serde(default)]
  summary: String,
  items: Vec<WireItem>,
  #[serde(default)]
  labor_hours: Option<WireLaborRange>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
  name: String,
  quantity: Decimal,
  unit: String,
  #[serde(default)]
  reason: String,
}

#[derive(Debug, Deserialize)]
struct WireLaborRange {
  min: Decimal,
  max: Decimal,
}

/// Map the raw response body into a report, degrading malformed payloads
/// to a text-only summary.
fn parse_report(body: &str) -> SuggestionReport {
  match serde_json::from_str::<WireReport>(body) {
    Ok(wire) => SuggestionReport {
      summary: wire.summary,
      items: wire
        .items
        .into_iter()
        .map(|item| SuggestedItem {
          name: item.name,
          quantity: item.quantity,
          unit: item.unit,
          reason: item.reason,
        })
        .collect(),
      labor_hours_range: wire.labor_hours.map(|range| (range.min, range.max)),
    },
    Err(error) => {
      tracing::warn!("Suggestion payload failed to parse ({}); degrading to text", error);
      SuggestionReport {
        summary: body.trim().to_string(),
        items: Vec::new(),
        labor_hours_range: None,
      }
    }
  }
}

impl HttpSuggestionProvider {
  pub fn new(config: &SuggestionsConfig) -> Self {
    Self {
      client: Client::new(),
      endpoint: config.endpoint.clone(),
      api_key: config.api_key.clone(),
    }
  }
}

#[async_trait]
impl SuggestionProvider for HttpSuggestionProvider {
  async fn suggest_from_photo(
    &self,
    image: Vec<u8>,
    content_type: &str,
  ) -> Result<SuggestionReport, QuoteError> {
    let part = reqwest::multipart::Part::bytes(image)
      .file_name("photo")
      .mime_str(content_type)
      .map_err(|e| QuoteError::Suggestion(format!("Invalid content type: {}", e)))?;
    let form = reqwest::multipart::Form::new().part("photo", part);

    let mut request = self.client.post(&self.endpoint).multipart(form);
    if let Some(api_key) = &self.api_key {
      request = request.header("x-api-key", api_key);
    }

    let response = request
      .send()
      .await
      .map_err(|e| QuoteError::Suggestion(format!("Suggestion request failed: {}", e)))?;

    if !response.status().is_success() {
      let status = response.status();
      return Err(QuoteError::Suggestion(format!(
        "Suggestion endpoint returned {}",
        status
      )));
    }

    let body = response
      .text()
      .await
      .map_err(|e| QuoteError::Suggestion(format!("Unreadable suggestion response: {}", e)))?;

    Ok(parse_report(&body))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_parse_structured_report() {
    let body = r#"{
      "summary": "Roughly 40ft of fence line with two leaning posts.",
      "items": [
        {"name": "Pressure-treated post", "quantity": 2, "unit": "each", "reason": "leaning posts"},
        {"name": "Concrete mix", "quantity": 4, "unit": "bag"}
      ],
      "labor_hours": {"min": 3, "max": 5}
    }"#;

    let report = parse_report(body);
    assert_eq!(report.items.len(), 2);
    assert_eq!(report.items[0].quantity, dec!(2));
    assert_eq!(report.items[1].reason, "");
    assert_eq!(report.labor_hours_range, Some((dec!(3), dec!(5))));
  }

  #[test]
  fn test_malformed_payload_degrades_to_text() {
    let body = "The photo shows a damaged fence but I could not itemize it.";
    let report = parse_report(body);
    assert_eq!(report.summary, body);
    assert!(report.items.is_empty());
    assert!(report.labor_hours_range.is_none());
  }

  #[test]
  fn test_wrong_shape_degrades_to_text() {
    let body = r#"{"items": "not-a-list"}"#;
    let report = parse_report(body);
    assert!(report.items.is_empty());
    assert_eq!(report.summary, body);
  }
}
