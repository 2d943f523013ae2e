use std::sync::Arc;

use promptdeck_core::service::TemplateService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Template use cases, wired to the configured repository at startup.
    pub templates: TemplateService,
}
