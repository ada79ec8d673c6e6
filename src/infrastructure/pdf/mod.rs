pub mod templates;
pub mod wkhtmltopdf_renderer;

pub use templates::TemplateEngine;
pub use wkhtmltopdf_renderer::WkHtmlToPdfRenderer;
