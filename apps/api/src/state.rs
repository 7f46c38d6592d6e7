use std::sync::Arc;

use crate::config::Config;
use crate::providers::http::JobsHttp;
use crate::sources::CompanySource;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is immutable after startup; queries build all of their
/// own transient data, so handlers share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub http: JobsHttp,
    pub sources: Arc<Vec<CompanySource>>,
    pub config: Config,
}
