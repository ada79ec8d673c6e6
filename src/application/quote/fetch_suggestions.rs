use std::sync::Arc;

use crate::domain::quote::{QuoteError, SuggestionProvider, SuggestionReport};

#[derive(Debug)]
pub struct FetchSuggestionsCommand {
  pub image: Vec<u8>,
  pub content_type: String,
}

/// Ask the photo analysis collaborator for line-item suggestions. The
/// report goes back to the UI for review; accepting it folds into the
/// draft through the editor's apply_suggestions op.
pub struct FetchSuggestionsUseCase {
  provider: Option<Arc<dyn SuggestionProvider>>,
}

impl FetchSuggestionsUseCase {
  pub fn new(provider: Option<Arc<dyn SuggestionProvider>>) -> Self {
    Self { provider }
  }

  pub async fn execute(
    &self,
    command: FetchSuggestionsCommand,
  ) -> Result<SuggestionReport, QuoteError> {
    let provider = self
      .provider
      .as_ref()
      .ok_or_else(|| QuoteError::Suggestion("No suggestion endpoint configured".to_string()))?;

    provider
      .suggest_from_photo(command.image, &command.content_type)
      .await
  }
}
