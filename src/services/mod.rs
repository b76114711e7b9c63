pub mod api_client;
pub mod auth_service;
pub mod export_service;
pub mod resource_client;

#[cfg(test)]
pub mod mock_transport;

pub use api_client::{ApiError, GlooTransport, HttpRequest, HttpResponse, Method, Transport};
pub use auth_service::{AuthError, AuthService};
pub use export_service::{download_pdf, render_pdf, ExportError, MailRelay, PdfExport};
pub use resource_client::ResourceClient;
