use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::domain::quote::AutosaveConfig;

fn default_store_timeout() -> u64 {
  10
}

fn default_session_ttl() -> u64 {
  8 * 60 * 60
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub company: CompanyConfig,
  pub store: StoreConfig,
  #[serde(default)]
  pub notify: Option<NotifyConfig>,
  #[serde(default)]
  pub suggestions: Option<SuggestionsConfig>,
  pub pdf: PdfConfig,
  pub security: SecurityConfig,
  #[serde(default)]
  pub autosave: AutosaveConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Public base URL used in quote links handed to the notifier.
  pub base_url: String,
}

/// Company profile printed on every exported quote
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
  pub name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub terms_text: String,
}

/// Remote quote store collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  pub base_url: String,
  pub api_key: String,
  #[serde(default = "default_store_timeout")]
  pub timeout_seconds: u64,
}

/// Notification collaborator; exported quotes go unannounced when absent
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
  pub endpoint: String,
  #[serde(default)]
  pub api_key: Option<String>,
}

/// Photo suggestion collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsConfig {
  pub endpoint: String,
  #[serde(default)]
  pub api_key: Option<String>,
}

/// PDF generation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
  pub output_dir: String,
  pub wkhtmltopdf_path: Option<String>,
}

/// Internal tool access gate
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  /// Argon2 hash of the shared tool password.
  pub password_hash: String,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_seconds: u64,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Sources are layered, later overriding earlier:
  /// 1. config/default.toml
  /// 2. config/local.toml (if present)
  /// 3. config/{RUN_MODE}.toml (if present)
  /// 4. Environment variables with QUOTEDESK_ prefix and double-underscore
  ///    separators, e.g. `QUOTEDESK_SERVER__PORT=8080`,
  ///    `QUOTEDESK_STORE__API_KEY=...`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("QUOTEDESK")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_minimal_config_deserializes() {
    let raw = r#"
      [server]
      host = "127.0.0.1"
      port = 8080
      base_url = "http://localhost:8080"

      [company]
      name = "Summit Exteriors"

      [store]
      base_url = "https://records.example.com/api"
      api_key = "test-key"

      [pdf]
      output_dir = "generated"

      [security]
      password_hash = "$argon2id$v=19$m=19456,t=2,p=1$abc$def"
    "#;

    let config: Config = ConfigBuilder::builder()
      .add_source(config::File::from_str(raw, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.store.timeout_seconds, 10);
    assert!(config.notify.is_none());
    assert!(config.autosave.enabled);
    assert_eq!(config.autosave.debounce_ms, 5000);
  }
}
