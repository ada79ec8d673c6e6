pub mod draft;
pub mod editor;
pub mod entities;
pub mod errors;
pub mod packages;
pub mod ports;
pub mod pricing;
pub mod services;
pub mod value_objects;

pub use draft::{AutosaveConfig, DraftController, DraftOp, SaveStatus};
pub use editor::{EditorState, QuoteEditor, SaveOutcome};
pub use entities::{
  CustomerInfo, LineItem, LineItemPatch, QuoteDraft, QuoteIdentity, QuoteRecord, QuoteTotals,
};
pub use errors::QuoteError;
pub use packages::QuickPackage;
pub use ports::{
  ExportLineRow, QuoteExportView, QuoteNotification, QuoteNotifier, QuotePdfRenderer, QuoteStore,
  SuggestedItem, SuggestionProvider, SuggestionReport,
};
pub use pricing::{TierConfig, TierPricing, compute_subtotal, compute_tier_pricing};
pub use services::QuoteService;
pub use value_objects::{
  ItemName, MarkupPercent, Money, PricingTier, Quantity, QuoteNumber, QuoteStatus,
  ValueObjectError,
};
