use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::report::ReportSink;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup: analyses never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable extractor. Default: DocumentExtractor (PDF + plain text).
    pub extractor: Arc<dyn TextExtractor>,
    /// Receivers of finished summaries. Always contains the log sink.
    pub sinks: Arc<Vec<Arc<dyn ReportSink>>>,
}
