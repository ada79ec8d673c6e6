use actix_web::web;
use std::sync::Arc;

use crate::application::quote::{
  ChangeQuoteStatusUseCase, CloseQuoteUseCase, DeleteQuoteUseCase, DuplicateQuoteUseCase,
  EditQuoteUseCase, EditorSessions, ExportQuoteUseCase, FetchSuggestionsUseCase,
  GetQuoteDetailsUseCase, ListQuotesUseCase, OpenQuoteUseCase, SaveQuoteUseCase,
};
use crate::infrastructure::security::AccessGate;

use super::handlers::{auth, editor, quotes};

pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, gate: Arc<AccessGate>) {
  cfg
    .app_data(web::Data::new(gate))
    .route("/login", web::post().to(auth::login_handler))
    .route("/logout", web::post().to(auth::logout_handler));
}

/// Use cases behind the editor-session endpoints
pub struct EditorRouteDependencies {
  pub sessions: Arc<EditorSessions>,
  pub open_quote_use_case: Arc<OpenQuoteUseCase>,
  pub edit_quote_use_case: Arc<EditQuoteUseCase>,
  pub save_quote_use_case: Arc<SaveQuoteUseCase>,
  pub close_quote_use_case: Arc<CloseQuoteUseCase>,
  pub fetch_suggestions_use_case: Arc<FetchSuggestionsUseCase>,
}

pub fn configure_editor_routes(cfg: &mut web::ServiceConfig, deps: EditorRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.sessions))
    .app_data(web::Data::new(deps.open_quote_use_case))
    .app_data(web::Data::new(deps.edit_quote_use_case))
    .app_data(web::Data::new(deps.save_quote_use_case))
    .app_data(web::Data::new(deps.close_quote_use_case))
    .app_data(web::Data::new(deps.fetch_suggestions_use_case))
    .route("/sessions", web::post().to(editor::open_session_handler))
    .route(
      "/sessions/{session_id}",
      web::get().to(editor::get_session_handler),
    )
    .route(
      "/sessions/{session_id}",
      web::delete().to(editor::close_session_handler),
    )
    .route(
      "/sessions/{session_id}/ops",
      web::post().to(editor::apply_op_handler),
    )
    .route(
      "/sessions/{session_id}/save",
      web::post().to(editor::save_draft_handler),
    )
    .route(
      "/sessions/{session_id}/suggestions",
      web::post().to(editor::fetch_suggestions_handler),
    );
}

/// Use cases behind the persisted-quote endpoints
pub struct QuoteRouteDependencies {
  pub list_quotes_use_case: Arc<ListQuotesUseCase>,
  pub get_quote_details_use_case: Arc<GetQuoteDetailsUseCase>,
  pub delete_quote_use_case: Arc<DeleteQuoteUseCase>,
  pub duplicate_quote_use_case: Arc<DuplicateQuoteUseCase>,
  pub change_quote_status_use_case: Arc<ChangeQuoteStatusUseCase>,
  pub export_quote_use_case: Arc<ExportQuoteUseCase>,
}

pub fn configure_quote_routes(cfg: &mut web::ServiceConfig, deps: QuoteRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.list_quotes_use_case))
    .app_data(web::Data::new(deps.get_quote_details_use_case))
    .app_data(web::Data::new(deps.delete_quote_use_case))
    .app_data(web::Data::new(deps.duplicate_quote_use_case))
    .app_data(web::Data::new(deps.change_quote_status_use_case))
    .app_data(web::Data::new(deps.export_quote_use_case))
    .route("", web::get().to(quotes::list_quotes_handler))
    .route("/{quote_id}", web::get().to(quotes::get_quote_handler))
    .route("/{quote_id}", web::delete().to(quotes::delete_quote_handler))
    .route(
      "/{quote_id}/duplicate",
      web::post().to(quotes::duplicate_quote_handler),
    )
    .route(
      "/{quote_id}/status",
      web::post().to(quotes::change_status_handler),
    )
    .route(
      "/{quote_id}/export",
      web::post().to(quotes::export_quote_handler),
    );
}
