//! Report writing — renders a `ParsedResume` as a two-column DOCX table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docx_rs::{BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};
use serde::Serialize;
use tracing::info;

use crate::parsing::assembler::RESERVED_KEYS;
use crate::parsing::{ParsedResume, NOT_AVAILABLE};

const REPORT_TITLE: &str = "Parsed Resume";

/// One table row: section name and its lines joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub section: String,
    pub details: String,
}

/// Contact rows first, then every other section in resume order.
pub fn report_rows(resume: &ParsedResume) -> Vec<ReportRow> {
    let details = |lines: Option<&[String]>| match lines {
        Some(lines) if !lines.is_empty() => lines.join("\n"),
        _ => NOT_AVAILABLE.to_string(),
    };

    let mut rows: Vec<ReportRow> = RESERVED_KEYS
        .iter()
        .map(|key| ReportRow {
            section: (*key).to_string(),
            details: details(resume.get(key)),
        })
        .collect();

    rows.extend(
        resume
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(key))
            .map(|(key, lines)| ReportRow {
                section: key.to_string(),
                details: details(Some(lines)),
            }),
    );

    rows
}

/// Output file stem for an uploaded file name: directories and extension removed, anything
/// outside `[A-Za-z0-9_-]` replaced by `_`. Falls back to `resume`.
pub fn output_stem(file_name: Option<&str>) -> String {
    let base = file_name
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(|name| {
            Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(name)
        })
        .unwrap_or("");

    let sanitized: String = base
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim_matches('_');
    if sanitized.is_empty() {
        "resume".to_string()
    } else {
        sanitized.to_string()
    }
}

/// Sink for parsed résumés. `AppState` holds an `Arc<dyn ReportWriter>`.
pub trait ReportWriter: Send + Sync {
    /// Writes the report and returns the path it was written to.
    fn write(&self, resume: &ParsedResume, source_name: Option<&str>) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct DocxReportWriter {
    output_dir: PathBuf,
}

impl DocxReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn build(resume: &ParsedResume) -> Docx {
        let title = Paragraph::new().add_run(Run::new().add_text(REPORT_TITLE).bold().size(32));

        let mut rows = vec![TableRow::new(vec![
            text_cell(&["Section"], true),
            text_cell(&["Details"], true),
        ])];
        for row in report_rows(resume) {
            let lines: Vec<&str> = row.details.split('\n').collect();
            rows.push(TableRow::new(vec![
                text_cell(&[row.section.as_str()], false),
                text_cell(&lines, false),
            ]));
        }

        Docx::new().add_paragraph(title).add_table(Table::new(rows))
    }
}

fn text_cell(lines: &[&str], bold: bool) -> TableCell {
    let mut run = Run::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(*line);
    }
    if bold {
        run = run.bold();
    }
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

impl ReportWriter for DocxReportWriter {
    fn write(&self, resume: &ParsedResume, source_name: Option<&str>) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;

        let path = self
            .output_dir
            .join(format!("{}_parsed.docx", output_stem(source_name)));

        // Write to a temp file in the same directory, then rename into place.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.output_dir)
            .context("Failed to create temporary report file")?;
        Self::build(resume)
            .build()
            .pack(tmp.as_file_mut())
            .context("Failed to encode DOCX report")?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to persist report to {}", path.display()))?;

        info!(path = %path.display(), "Saved parsed resume report");
        Ok(path)
    }
}
