//! Document text extraction — turns uploaded PDF/DOCX bytes into raw text for the parser.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default is `DocumentTextExtractor`,
//! which dispatches on the detected document kind.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("failed to read DOCX: {0}")]
    Docx(String),
}

impl DocumentKind {
    /// Detects the kind from the file extension, falling back to magic bytes.
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> Result<Self, ExtractionError> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => return Ok(DocumentKind::Pdf),
            Some("docx") => return Ok(DocumentKind::Docx),
            _ => {}
        }

        if bytes.starts_with(b"%PDF") {
            Ok(DocumentKind::Pdf)
        } else if bytes.starts_with(b"PK\x03\x04") {
            Ok(DocumentKind::Docx)
        } else {
            Err(ExtractionError::UnsupportedFormat(
                extension.unwrap_or_else(|| "unknown".to_string()),
            ))
        }
    }
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, file_name: Option<&str>, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Thin wrapper over `pdf_extract::extract_text_from_mem`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, _file_name: Option<&str>, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| {
                ExtractionError::Pdf("extractor panicked on malformed input".to_string())
            })?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}

/// Reads body paragraphs and table cells, one line each, in document order.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract(&self, _file_name: Option<&str>, bytes: &[u8]) -> Result<String, ExtractionError> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let mut lines = Vec::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(para) => {
                    lines.push(paragraph_text(para));
                }
                docx_rs::DocumentChild::Table(table) => {
                    for table_child in &table.rows {
                        let docx_rs::TableChild::TableRow(row) = table_child;
                        for row_child in &row.cells {
                            let docx_rs::TableRowChild::TableCell(cell) = row_child;
                            for content in &cell.children {
                                if let docx_rs::TableCellContent::Paragraph(para) = content {
                                    lines.push(paragraph_text(para));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(lines.join("\n"))
    }
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(&mut text, run),
            docx_rs::ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        push_run_text(&mut text, run);
                    }
                }
            }
            // Deletions (track changes) are not part of the visible text.
            _ => {}
        }
    }
    text
}

fn push_run_text(text: &mut String, run: &docx_rs::Run) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => text.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => text.push('\t'),
            docx_rs::RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// Dispatches to the PDF or DOCX extractor based on `DocumentKind::detect`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTextExtractor {
    pdf: PdfTextExtractor,
    docx: DocxTextExtractor,
}

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, file_name: Option<&str>, bytes: &[u8]) -> Result<String, ExtractionError> {
        match DocumentKind::detect(file_name, bytes)? {
            DocumentKind::Pdf => self.pdf.extract(file_name, bytes),
            DocumentKind::Docx => self.docx.extract(file_name, bytes),
        }
    }
}
