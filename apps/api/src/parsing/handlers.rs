//! Axum route handlers for the Parsing API.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::DocumentKind;
use crate::parsing::{ParseOutcome, ParsedResume, SectionCatalog};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub message: String,
    pub docx_file: String,
    pub document_kind: DocumentKind,
    pub resume: ParsedResume,
    pub parsed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

struct Upload {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Resume Parsing API!",
    })
}

/// POST /parse-resume/
///
/// Multipart upload (field `file`, PDF or DOCX). Extracts text, parses it, writes the DOCX
/// report and returns its path with the parsed sections. A document that cannot be read
/// is parsed as empty text, so every field comes back as "Not Available".
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let document_kind = DocumentKind::detect(upload.file_name.as_deref(), &upload.bytes)?;

    let request_id = Uuid::new_v4();
    let span = info_span!(
        "parse_resume",
        %request_id,
        file_name = upload.file_name.as_deref().unwrap_or(""),
        bytes = upload.bytes.len(),
    );

    let parser = state.parser.clone();
    let extractor = state.extractor.clone();
    let report_writer = state.report_writer.clone();

    // Extraction, parsing and DOCX encoding are CPU-bound.
    let (resume, docx_path) = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        let file_name = upload.file_name.as_deref();

        let text = match extractor.extract(file_name, &upload.bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Text extraction failed, parsing empty text");
                String::new()
            }
        };
        if text.trim().is_empty() {
            warn!("No text extracted from document");
        }

        let resume = parser.parse(&text);
        let path = report_writer.write(&resume, file_name)?;
        info!(sections = resume.len(), "Resume parsed");
        anyhow::Ok((resume, path))
    })
    .await
    .context("Resume parsing task failed")??;

    Ok(Json(ParseResumeResponse {
        message: "Resume parsed successfully!".to_string(),
        docx_file: docx_path.display().to_string(),
        document_kind,
        resume,
        parsed_at: Utc::now(),
    }))
}

/// POST /api/v1/parse/text
///
/// Parses already-extracted text. Empty text is valid input.
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<ParseOutcome>, AppError> {
    let parser = state.parser.clone();
    let outcome = tokio::task::spawn_blocking(move || parser.parse_document(&request.text))
        .await
        .context("Resume parsing task failed")?;

    Ok(Json(outcome))
}

/// GET /api/v1/catalog
///
/// Returns the active section catalog in match order.
pub async fn handle_get_catalog(State(state): State<AppState>) -> Json<SectionCatalog> {
    Json(state.parser.catalog().clone())
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();
        return Ok(Upload { file_name, bytes });
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}
