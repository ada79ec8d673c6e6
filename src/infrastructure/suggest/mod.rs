pub mod http_suggestions;

pub use http_suggestions::HttpSuggestionProvider;
