use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::llm_client::LlmGateway;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: `PgStore`.
    pub store: Arc<dyn Store>,
    /// Pluggable completion backend. Default: `LlmClient`.
    pub llm: Arc<dyn LlmGateway>,
    pub tokens: TokenService,
    pub config: Config,
}
