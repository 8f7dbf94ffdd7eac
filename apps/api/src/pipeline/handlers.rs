use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Language, OutputFormat, SourceDocument};
use crate::pipeline::session::{Session, SessionHandle};
use crate::pipeline::{Pipeline, PipelineState, PipelineWarning};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

/// Parsed `multipart/form-data` body of a generation request.
#[derive(Debug)]
pub struct LetterForm {
    pub document: SourceDocument,
    pub context: String,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct EditLetterRequest {
    pub letter: String,
}

#[derive(Debug, Serialize)]
pub struct WarningView {
    #[serde(flatten)]
    pub warning: PipelineWarning,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LetterSessionResponse {
    pub session_id: Uuid,
    pub state: PipelineState,
    pub language: Option<Language>,
    pub letter: Option<String>,
    pub recommendations: Option<String>,
    pub warnings: Vec<WarningView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LetterSessionResponse {
    fn from_session(session_id: Uuid, session: &Session) -> Self {
        let output = session.pipeline.output();
        Self {
            session_id,
            state: session.pipeline.state(),
            language: output.map(|o| o.language),
            letter: output.map(|o| o.letter.clone()),
            recommendations: output.and_then(|o| o.recommendations.clone()),
            warnings: output
                .map(|o| {
                    o.warnings
                        .iter()
                        .map(|w| WarningView {
                            warning: w.clone(),
                            message: w.message(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/letters
///
/// Runs the whole pipeline in a fresh session. The session is only kept when the run succeeds.
pub async fn handle_create_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<LetterSessionResponse>, AppError> {
    let form = read_letter_form(multipart).await?;
    info!(
        format = %form.document.format_tag,
        bytes = form.document.bytes.len(),
        language = ?form.language,
        "Letter generation requested"
    );

    let mut pipeline = Pipeline::new(
        state.composer.clone(),
        state.generator.clone(),
        state.config.min_extracted_chars,
    );
    pipeline
        .run(form.document, &form.context, form.language)
        .await?;

    let (session_id, handle) = state.sessions.insert(pipeline).await;
    let session = handle.lock().await;
    info!(%session_id, "Letter session created");
    Ok(Json(LetterSessionResponse::from_session(session_id, &session)))
}

/// POST /api/v1/letters/:id/regenerate
///
/// Re-runs the pipeline on an existing session with a new upload. A failed run leaves the
/// session idle with no letter.
pub async fn handle_regenerate_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<LetterSessionResponse>, AppError> {
    let handle = find_session(&state, id).await?;
    let form = read_letter_form(multipart).await?;

    let mut session = handle.lock().await;
    session.touch();
    session
        .pipeline
        .run(form.document, &form.context, form.language)
        .await?;
    Ok(Json(LetterSessionResponse::from_session(id, &session)))
}

/// GET /api/v1/letters/:id
pub async fn handle_get_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LetterSessionResponse>, AppError> {
    let handle = find_session(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(LetterSessionResponse::from_session(id, &session)))
}

/// PUT /api/v1/letters/:id
pub async fn handle_edit_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EditLetterRequest>,
) -> Result<Json<LetterSessionResponse>, AppError> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.lock().await;
    session.touch();
    session.pipeline.edit_letter(req.letter)?;
    Ok(Json(LetterSessionResponse::from_session(id, &session)))
}

/// GET /api/v1/letters/:id/export/:format
pub async fn handle_export_letter(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let format = OutputFormat::parse(&format).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown export format '{format}'. Use 'pdf' or 'docx'."
        ))
    })?;
    let handle = find_session(&state, id).await?;

    let rendered = {
        let mut session = handle.lock().await;
        session.touch();
        session.pipeline.export(format).await?
    };

    info!(%id, ?format, bytes = rendered.bytes.len(), "Letter exported");
    let disposition = format!("attachment; filename=\"{}\"", rendered.suggested_filename());
    Ok((
        [
            (header::CONTENT_TYPE, rendered.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn find_session(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Letter session {id} not found")))
}

/// Reads `file`, `context`, `language` and an optional explicit `format` field.
/// Without `format`, the uploaded file name's extension is the format tag.
pub async fn read_letter_form(mut multipart: Multipart) -> Result<LetterForm, AppError> {
    let bad_body = |e: axum::extract::multipart::MultipartError| {
        AppError::Validation(format!("Invalid multipart body: {e}"))
    };

    let mut file: Option<(String, Bytes)> = None;
    let mut format: Option<String> = None;
    let mut context = String::new();
    let mut language = Language::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_body)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_body)?;
                file = Some((file_name, bytes));
            }
            "format" => format = Some(field.text().await.map_err(bad_body)?),
            "context" => context = field.text().await.map_err(bad_body)?,
            "language" => {
                let raw = field.text().await.map_err(bad_body)?;
                if !raw.trim().is_empty() {
                    language = Language::parse(&raw).ok_or_else(|| {
                        AppError::Validation(format!(
                            "Unsupported language '{}'. Use 'fr' or 'en'.",
                            raw.trim()
                        ))
                    })?;
                }
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("The uploaded file is empty".to_string()));
    }
    let document = match format.filter(|f| !f.trim().is_empty()) {
        Some(tag) => SourceDocument::new(bytes.to_vec(), tag),
        None => SourceDocument::from_filename(bytes.to_vec(), &file_name),
    };

    Ok(LetterForm {
        document,
        context,
        language,
    })
}
