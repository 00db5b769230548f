//! Axum route handlers for the admin panel.
//!
//! Every handler holds the console lock only while touching the session; the
//! remote save in `handle_commit` runs with the lock released and the console
//! parked in `committing`, which is what serialises saves.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::BearerToken;
use crate::content::gateway::SaveOutcome;
use crate::editor::image::to_data_url;
use crate::editor::session::SessionStatus;
use crate::editor::text::{join_description_lines, join_skill_items};
use crate::editor::{ImageTarget, ListKind, Section};
use crate::errors::AppError;
use crate::models::content::ContentDocument;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub secret: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub status: SessionStatus,
}

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    pub section: Section,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub id: String,
}

/// The draft plus the text-box form of its list fields.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub section: Section,
    pub document: ContentDocument,
    /// Experience id -> newline-joined bullets.
    pub description_text: BTreeMap<String, String>,
    /// Skill group id -> comma-joined items.
    pub skill_items_text: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub target: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct CommitResponse {
    #[serde(flatten)]
    pub outcome: SaveOutcome,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/admin/session
pub async fn handle_session_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.console.lock().await.status())
}

/// POST /api/v1/admin/session/begin
pub async fn handle_begin_auth(
    State(state): State<AppState>,
) -> Result<Json<SessionStatus>, AppError> {
    let mut console = state.console.lock().await;
    console.begin_auth()?;
    Ok(Json(console.status()))
}

/// POST /api/v1/admin/session/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Snapshot under the console lock: a commit replaces the live document
    // before it releases `committing`, so the draft always starts from it.
    let mut console = state.console.lock().await;
    let live = state.live.snapshot();
    let token = console.login(&req.secret, &live)?;
    Ok(Json(LoginResponse {
        token: token.to_string(),
        status: console.status(),
    }))
}

/// POST /api/v1/admin/session/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<StatusCode, AppError> {
    state.console.lock().await.logout(token.as_deref())?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/edit
pub async fn handle_reopen(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<SessionStatus>, AppError> {
    let mut console = state.console.lock().await;
    let live = state.live.snapshot();
    console.reopen(token.as_deref(), &live)?;
    Ok(Json(console.status()))
}

/// POST /api/v1/admin/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<SessionStatus>, AppError> {
    let mut console = state.console.lock().await;
    console.cancel(token.as_deref())?;
    Ok(Json(console.status()))
}

// ────────────────────────────────────────────────────────────────────────────
// Draft
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/admin/draft
pub async fn handle_get_draft(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<DraftResponse>, AppError> {
    let console = state.console.lock().await;
    let session = console.session(token.as_deref())?;
    let document = session.draft.document().clone();

    let description_text = document
        .experiences
        .iter()
        .map(|e| (e.id.clone(), join_description_lines(&e.description)))
        .collect();
    let skill_items_text = document
        .skills
        .iter()
        .map(|s| (s.id.clone(), join_skill_items(&s.items)))
        .collect();

    Ok(Json(DraftResponse {
        section: session.section,
        document,
        description_text,
        skill_items_text,
    }))
}

/// PUT /api/v1/admin/draft/section
pub async fn handle_set_section(
    State(state): State<AppState>,
    token: BearerToken,
    Json(req): Json<SectionRequest>,
) -> Result<Json<SessionStatus>, AppError> {
    let mut console = state.console.lock().await;
    console.session_mut(token.as_deref())?.section = req.section;
    Ok(Json(console.status()))
}

/// PATCH /api/v1/admin/draft/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    token: BearerToken,
    Json(req): Json<FieldUpdate>,
) -> Result<StatusCode, AppError> {
    let mut console = state.console.lock().await;
    let session = console.session_mut(token.as_deref())?;
    session.draft.update_profile(&req.field, req.value)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/draft/:list/entries
pub async fn handle_append_entry(
    State(state): State<AppState>,
    token: BearerToken,
    Path(list): Path<ListKind>,
) -> Result<(StatusCode, Json<AppendResponse>), AppError> {
    let mut console = state.console.lock().await;
    let session = console.session_mut(token.as_deref())?;
    let id = session.draft.append_default_entry(list);
    Ok((StatusCode::CREATED, Json(AppendResponse { id })))
}

/// PATCH /api/v1/admin/draft/:list/entries/:id
///
/// An unknown id is a no-op, matching removal.
pub async fn handle_update_entry(
    State(state): State<AppState>,
    token: BearerToken,
    Path((list, id)): Path<(ListKind, String)>,
    Json(req): Json<FieldUpdate>,
) -> Result<StatusCode, AppError> {
    let mut console = state.console.lock().await;
    let session = console.session_mut(token.as_deref())?;
    if !session
        .draft
        .update_field(list, &id, &req.field, req.value)?
    {
        warn!("Ignored update to missing {} entry {id}", list.as_str());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/draft/:list/entries/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    token: BearerToken,
    Path((list, id)): Path<(ListKind, String)>,
) -> Result<StatusCode, AppError> {
    let mut console = state.console.lock().await;
    let session = console.session_mut(token.as_deref())?;
    session.draft.remove_entry(list, &id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/draft/images (multipart: `target`, `file`)
pub async fn handle_upload_image(
    State(state): State<AppState>,
    token: BearerToken,
    mut multipart: Multipart,
) -> Result<Json<ImageResponse>, AppError> {
    // Reject strangers before reading a large body.
    state.console.lock().await.session(token.as_deref())?;

    let mut target: Option<String> = None;
    let mut file: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "target" => target = Some(field.text().await?),
            "file" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                file = Some((content_type, field.bytes().await?));
            }
            _ => {}
        }
    }

    let raw_target =
        target.ok_or_else(|| AppError::Validation("missing 'target' field".to_string()))?;
    let (content_type, data) =
        file.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;

    let image_target = ImageTarget::parse(&raw_target)?;
    let data_url = to_data_url(&content_type, &data)?;

    let mut console = state.console.lock().await;
    let session = console.session_mut(token.as_deref())?;
    if !session.draft.set_image(&image_target, data_url) {
        return Err(AppError::NotFound(format!(
            "No portfolio item for image target '{raw_target}'"
        )));
    }

    Ok(Json(ImageResponse {
        target: raw_target,
        size: data.len(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Commit
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/admin/commit
///
/// The live document takes the draft whatever the remote outcome; a failed
/// remote write is reported as `local_only` rather than as an error.
pub async fn handle_commit(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<CommitResponse>, AppError> {
    let doc = state.console.lock().await.begin_commit(token.as_deref())?;

    // Detached so a dropped request cannot strand the console in `committing`.
    let task_state = state.clone();
    let outcome = tokio::spawn(async move {
        let outcome = task_state.gateway.save(&doc).await;
        task_state.live.replace(doc);
        task_state.console.lock().await.finish_commit();
        outcome
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("commit task failed: {e}")))?;

    let message = if outcome.is_synced() {
        info!("Content published");
        "Content published and synced to the remote store.".to_string()
    } else {
        "Saving to the remote store failed; changes are kept locally. \
         Check the connection and save again."
            .to_string()
    };

    Ok(Json(CommitResponse { outcome, message }))
}
