use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::options::catalog::ReferenceData;
use crate::options::store::CustomOptionStore;
use crate::review::quote_usage::QuoteMatcher;
use crate::review::repository::ReviewStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub reviews: Arc<dyn ReviewStore>,
    pub custom_options: Arc<dyn CustomOptionStore>,
    pub llm: Arc<dyn TextGenerator>,
    /// Default: PrefixQuoteMatcher (first 20 characters).
    pub quote_matcher: Arc<dyn QuoteMatcher>,
    /// Default catalogs and quotation pool, loaded once at startup.
    pub reference: Arc<ReferenceData>,
}
