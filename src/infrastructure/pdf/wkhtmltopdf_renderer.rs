use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use uuid::Uuid;

use crate::domain::quote::{QuoteError, QuoteExportView, QuotePdfRenderer};

use super::templates::TemplateEngine;

/// Renders the quote HTML with tera and converts it to a paginated,
/// fixed-layout PDF with wkhtmltopdf.
pub struct WkHtmlToPdfRenderer {
  templates: TemplateEngine,
  output_dir: PathBuf,
  wkhtmltopdf_path: String,
}

/// Download filename: `<Company>-Quote-<quoteNumber>.pdf`, company name
/// collapsed to a single token.
pub fn quote_filename(company_name: &str, quote_number: &str) -> String {
  let company: String = company_name.split_whitespace().collect();
  format!("{}-Quote-{}.pdf", company, quote_number)
}

impl WkHtmlToPdfRenderer {
  pub fn new(
    templates: TemplateEngine,
    output_dir: PathBuf,
    wkhtmltopdf_path: Option<String>,
  ) -> Self {
    // Create output directory if doesn't exist
    std::fs::create_dir_all(&output_dir).ok();

    let wkhtmltopdf_path = wkhtmltopdf_path.unwrap_or_else(|| "wkhtmltopdf".to_string());

    Self {
      templates,
      output_dir,
      wkhtmltopdf_path,
    }
  }

  async fn verify_wkhtmltopdf_installed(&self) -> Result<(), QuoteError> {
    let output = Command::new(&self.wkhtmltopdf_path)
      .arg("--version")
      .output()
      .await
      .map_err(|e| {
        QuoteError::PdfGenerationFailed(format!(
          "wkhtmltopdf not found: {}. Please install wkhtmltopdf.",
          e
        ))
      })?;

    if !output.status.success() {
      return Err(QuoteError::PdfGenerationFailed(
        "wkhtmltopdf is not working correctly".to_string(),
      ));
    }

    Ok(())
  }
}

#[async_trait]
impl QuotePdfRenderer for WkHtmlToPdfRenderer {
  async fn render_quote_pdf(&self, view: &QuoteExportView) -> Result<PathBuf, QuoteError> {
    self.verify_wkhtmltopdf_installed().await?;

    let context = tera::Context::from_serialize(view)
      .map_err(|e| QuoteError::PdfGenerationFailed(format!("Template context error: {}", e)))?;
    let html = self
      .templates
      .render("quote.html.tera", &context)
      .map_err(|e| QuoteError::PdfGenerationFailed(format!("Template render error: {}", e)))?;

    let html_path = self.output_dir.join(format!("{}.html", Uuid::new_v4()));
    tokio::fs::write(&html_path, html)
      .await
      .map_err(|e| QuoteError::PdfGenerationFailed(format!("Failed to stage HTML: {}", e)))?;

    let output_path = self
      .output_dir
      .join(quote_filename(&view.company_name, &view.quote_number));

    let output = Command::new(&self.wkhtmltopdf_path)
      .args([
        "--page-size",
        "Letter",
        "--margin-top",
        "10mm",
        "--margin-bottom",
        "10mm",
        "--margin-left",
        "10mm",
        "--margin-right",
        "10mm",
        "--quiet",
        html_path.to_str().unwrap_or_default(),
        output_path.to_str().unwrap_or_default(),
      ])
      .output()
      .await
      .map_err(|e| {
        QuoteError::PdfGenerationFailed(format!("wkhtmltopdf execution failed: {}", e))
      });

    // The staged HTML is scratch either way.
    tokio::fs::remove_file(&html_path).await.ok();
    let output = output?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(QuoteError::PdfGenerationFailed(format!(
        "wkhtmltopdf failed: {}",
        stderr
      )));
    }

    if !output_path.exists() {
      return Err(QuoteError::PdfGenerationFailed(
        "PDF file was not created".to_string(),
      ));
    }

    tracing::info!(path = %output_path.display(), "Quote PDF generated");
    Ok(output_path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_quote_filename_pattern() {
    assert_eq!(
      quote_filename("Summit Exteriors", "Q-101"),
      "SummitExteriors-Quote-Q-101.pdf"
    );
    assert_eq!(quote_filename("Acme", "Q-7"), "Acme-Quote-Q-7.pdf");
  }
}
