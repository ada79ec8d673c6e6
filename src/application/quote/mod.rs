pub mod change_quote_status;
pub mod close_quote;
pub mod delete_quote;
pub mod duplicate_quote;
pub mod edit_quote;
pub mod export_quote;
pub mod fetch_suggestions;
pub mod get_quote_details;
pub mod list_quotes;
pub mod open_quote;
pub mod save_quote;
pub mod sessions;

pub use change_quote_status::{ChangeQuoteStatusCommand, ChangeQuoteStatusUseCase};
pub use close_quote::{CloseQuoteCommand, CloseQuoteUseCase};
pub use delete_quote::{DeleteQuoteCommand, DeleteQuoteUseCase};
pub use duplicate_quote::{DuplicateQuoteCommand, DuplicateQuoteUseCase};
pub use edit_quote::{EditQuoteCommand, EditQuoteUseCase};
pub use export_quote::{ExportQuoteCommand, ExportQuoteUseCase};
pub use fetch_suggestions::{FetchSuggestionsCommand, FetchSuggestionsUseCase};
pub use get_quote_details::{GetQuoteDetailsCommand, GetQuoteDetailsUseCase};
pub use list_quotes::{ListQuotesCommand, ListQuotesUseCase};
pub use open_quote::{OpenQuoteCommand, OpenQuoteUseCase};
pub use save_quote::{SaveQuoteCommand, SaveQuoteUseCase};
pub use sessions::EditorSessions;
