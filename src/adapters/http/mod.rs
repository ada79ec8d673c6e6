pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use errors::ApiError;
pub use middleware::SessionMiddleware;
pub use routes::{
  EditorRouteDependencies, QuoteRouteDependencies, configure_auth_routes, configure_editor_routes,
  configure_quote_routes,
};
