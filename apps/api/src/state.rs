use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::parsing::ResumeParser;
use crate::report::ReportWriter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Parsing pipeline with its section catalog and tagger.
    pub parser: Arc<ResumeParser>,
    /// Pluggable document-to-text backend. Default: DocumentTextExtractor (PDF + DOCX).
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable report sink. Default: DocxReportWriter into `config.output_dir`.
    pub report_writer: Arc<dyn ReportWriter>,
}
