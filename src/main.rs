use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotedesk::{
  adapters::http::{
    EditorRouteDependencies, QuoteRouteDependencies, SessionMiddleware, configure_auth_routes,
    configure_editor_routes, configure_quote_routes,
  },
  application::quote::{
    ChangeQuoteStatusUseCase, CloseQuoteUseCase, DeleteQuoteUseCase, DuplicateQuoteUseCase,
    EditQuoteUseCase, EditorSessions, ExportQuoteUseCase, FetchSuggestionsUseCase,
    GetQuoteDetailsUseCase, ListQuotesUseCase, OpenQuoteUseCase, SaveQuoteUseCase,
  },
  domain::quote::{QuoteNotifier, QuoteService, QuoteStore, SuggestionProvider},
  infrastructure::{
    config::Config,
    notify::{HttpNotifier, NoOpNotifier},
    pdf::{TemplateEngine, WkHtmlToPdfRenderer},
    persistence::{HttpQuoteStore, InMemoryQuoteStore},
    security::AccessGate,
    suggest::HttpSuggestionProvider,
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quotedesk=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting QuoteDesk");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded");

  // Remote quote store; MEMORY_STORE=true swaps in the in-memory store
  // for development without a backend.
  let store: Arc<dyn QuoteStore> =
    if std::env::var("MEMORY_STORE").unwrap_or_default() == "true" {
      tracing::info!("Using in-memory quote store for development");
      Arc::new(InMemoryQuoteStore::new())
    } else {
      Arc::new(HttpQuoteStore::new(&config.store).context("Failed to build quote store client")?)
    };

  // Access gate and session registry for the internal tool
  let (gate, session_registry) =
    AccessGate::new(&config.security).context("Failed to initialize access gate")?;
  let gate = Arc::new(gate);

  // Domain services and editor sessions
  let quote_service = Arc::new(QuoteService::new(store.clone()));
  let editor_sessions = Arc::new(EditorSessions::new(store.clone(), config.autosave.clone()));

  // PDF pipeline
  let templates = TemplateEngine::new().context("Failed to initialize template engine")?;
  let pdf_renderer = Arc::new(WkHtmlToPdfRenderer::new(
    templates,
    PathBuf::from(&config.pdf.output_dir),
    config.pdf.wkhtmltopdf_path.clone(),
  ));
  tracing::info!("PDF renderer initialized");

  // Notification collaborator
  let notifier: Arc<dyn QuoteNotifier> = match &config.notify {
    Some(notify_config) => Arc::new(HttpNotifier::new(notify_config)),
    None => {
      tracing::warn!("No notification endpoint configured; exports will skip delivery");
      Arc::new(NoOpNotifier::new())
    }
  };

  // Optional suggestion collaborator
  let suggestion_provider: Option<Arc<dyn SuggestionProvider>> = config
    .suggestions
    .as_ref()
    .map(|suggest_config| {
      Arc::new(HttpSuggestionProvider::new(suggest_config)) as Arc<dyn SuggestionProvider>
    });

  // Use cases
  let open_quote_use_case = Arc::new(OpenQuoteUseCase::new(
    editor_sessions.clone(),
    quote_service.clone(),
  ));
  let edit_quote_use_case = Arc::new(EditQuoteUseCase::new(editor_sessions.clone()));
  let save_quote_use_case = Arc::new(SaveQuoteUseCase::new(editor_sessions.clone()));
  let close_quote_use_case = Arc::new(CloseQuoteUseCase::new(editor_sessions.clone()));
  let fetch_suggestions_use_case =
    Arc::new(FetchSuggestionsUseCase::new(suggestion_provider.clone()));

  let list_quotes_use_case = Arc::new(ListQuotesUseCase::new(quote_service.clone()));
  let get_quote_details_use_case = Arc::new(GetQuoteDetailsUseCase::new(quote_service.clone()));
  let delete_quote_use_case = Arc::new(DeleteQuoteUseCase::new(quote_service.clone()));
  let duplicate_quote_use_case = Arc::new(DuplicateQuoteUseCase::new(quote_service.clone()));
  let change_quote_status_use_case =
    Arc::new(ChangeQuoteStatusUseCase::new(quote_service.clone()));
  let export_quote_use_case = Arc::new(ExportQuoteUseCase::new(
    quote_service.clone(),
    pdf_renderer.clone(),
    notifier.clone(),
    config.company.clone(),
    config.server.base_url.clone(),
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      // Login/logout is the only unguarded surface
      .service(
        web::scope("/api/v1/auth").configure(|cfg| configure_auth_routes(cfg, gate.clone())),
      )
      // Editor sessions (protected)
      .service(
        web::scope("/api/v1/editor")
          .wrap(SessionMiddleware::new(session_registry.clone()))
          .configure(|cfg| {
            configure_editor_routes(
              cfg,
              EditorRouteDependencies {
                sessions: editor_sessions.clone(),
                open_quote_use_case: open_quote_use_case.clone(),
                edit_quote_use_case: edit_quote_use_case.clone(),
                save_quote_use_case: save_quote_use_case.clone(),
                close_quote_use_case: close_quote_use_case.clone(),
                fetch_suggestions_use_case: fetch_suggestions_use_case.clone(),
              },
            )
          }),
      )
      // Persisted quotes (protected)
      .service(
        web::scope("/api/v1/quotes")
          .wrap(SessionMiddleware::new(session_registry.clone()))
          .configure(|cfg| {
            configure_quote_routes(
              cfg,
              QuoteRouteDependencies {
                list_quotes_use_case: list_quotes_use_case.clone(),
                get_quote_details_use_case: get_quote_details_use_case.clone(),
                delete_quote_use_case: delete_quote_use_case.clone(),
                duplicate_quote_use_case: duplicate_quote_use_case.clone(),
                change_quote_status_use_case: change_quote_status_use_case.clone(),
                export_quote_use_case: export_quote_use_case.clone(),
              },
            )
          }),
      )
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
