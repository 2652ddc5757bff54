// Résumé parsing core.
// Implements: text normalization, contact extraction, section classification, assembly.
// Pure and synchronous. Callers on the async runtime go through spawn_blocking.

pub mod assembler;
pub mod catalog;
pub mod classifier;
pub mod contact;
pub mod handlers;
pub mod normalizer;
pub mod tagger;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

pub use assembler::{ParsedResume, NOT_AVAILABLE};
pub use catalog::SectionCatalog;
pub use tagger::{HeuristicTagger, PosTagger};

use crate::parsing::assembler::{assemble, RESERVED_KEYS};
use crate::parsing::classifier::SectionClassifier;
use crate::parsing::contact::extract_contact;
use crate::parsing::normalizer::{normalize_text, split_lines};

/// Everything one parse produces.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub resume: ParsedResume,
    /// Cleaned copy of the input. Not used for classification, which reads raw lines.
    pub normalized_text: String,
}

/// The parsing pipeline with its read-only configuration.
///
/// Shared across requests as `Arc<ResumeParser>`; holds no per-call state.
pub struct ResumeParser {
    catalog: SectionCatalog,
    tagger: Arc<dyn PosTagger>,
}

impl ResumeParser {
    pub fn new(catalog: SectionCatalog, tagger: Arc<dyn PosTagger>) -> Self {
        Self { catalog, tagger }
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    pub fn parse(&self, text: &str) -> ParsedResume {
        self.parse_document(text).resume
    }

    /// Contact extraction on raw text, normalization on a copy, classification on raw
    /// lines, then assembly. Never fails: missing data becomes `NOT_AVAILABLE`.
    pub fn parse_document(&self, text: &str) -> ParseOutcome {
        let contact = extract_contact(text, self.tagger.as_ref());
        let normalized_text = normalize_text(text);
        let sections = SectionClassifier::new(&self.catalog).classify(text);

        let found = (
            contact.name.is_some(),
            contact.email.is_some(),
            contact.phone.is_some(),
        );
        let resume = assemble(contact, sections);

        debug!(
            input_lines = split_lines(text).len(),
            normalized_chars = normalized_text.len(),
            sections = ?resume.keys().skip(RESERVED_KEYS.len()).collect::<Vec<_>>(),
            name_found = found.0,
            email_found = found.1,
            phone_found = found.2,
            "Parsed resume text"
        );

        ParseOutcome {
            resume,
            normalized_text,
        }
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(SectionCatalog::default(), Arc::new(HeuristicTagger))
    }
}
