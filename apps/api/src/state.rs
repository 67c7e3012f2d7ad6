use std::sync::Arc;

use crate::analysis::analyzer::GapAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; no per-user state lives here.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Default: GeminiGapAnalyzer.
    pub analyzer: Arc<dyn GapAnalyzer>,
    pub config: Config,
}
