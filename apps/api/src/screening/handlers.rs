//! Axum route handlers for the Screening API — the surface the external
//! render widget talks to, one turn per request.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::engine::{process_turn, GREETING};
use crate::screening::session::{CollectedField, Phase, Session, TranscriptEntry};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub messages: Vec<String>,
    pub terminated: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubmitMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitMessageResponse {
    pub messages: Vec<String>,
    pub terminated: bool,
}

/// Read-only session snapshot. The report-export collaborator consumes
/// `fields` and `transcript` from here.
#[derive(Debug, Serialize)]
pub struct SessionSnapshotResponse {
    pub session_id: Uuid,
    pub phase: Phase,
    pub current_prompt: Option<String>,
    pub current_question: Option<String>,
    pub terminated: bool,
    pub fields: Vec<CollectedField>,
    pub transcript: Vec<TranscriptEntry>,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Creates a session and returns the greeting plus the first intake prompt.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let session = Session::new();
    let first_prompt = session.current_prompt().map(str::to_string);
    let session_id = state.sessions.insert(session);

    tracing::info!(%session_id, active = state.sessions.len(), "Screening session created");

    let mut messages = vec![GREETING.to_string()];
    messages.extend(first_prompt);

    Ok(Json(CreateSessionResponse {
        session_id,
        messages,
        terminated: false,
    }))
}

/// POST /api/v1/sessions/:id/messages
///
/// Submits one user turn. The reply carries the assistant lines in order and
/// the terminal flag the widget uses to stop accepting input.
pub async fn handle_submit_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitMessageRequest>,
) -> Result<Json<SubmitMessageResponse>, AppError> {
    let shared = state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let mut session = shared.lock().await;
    let reply = process_turn(
        &mut session,
        &request.message,
        state.completion.as_ref(),
        state.sentiment.as_ref(),
        &state.policy,
    )
    .await;

    Ok(Json(SubmitMessageResponse {
        messages: reply.messages,
        terminated: reply.terminated,
    }))
}

/// GET /api/v1/sessions/:id
///
/// Read-only snapshot. MUST NOT mutate the session — re-rendering the widget
/// any number of times between turns observes identical state.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshotResponse>, AppError> {
    let shared = state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let session = shared.lock().await;

    Ok(Json(SessionSnapshotResponse {
        session_id: session.id,
        phase: session.phase.clone(),
        current_prompt: session.current_prompt().map(str::to_string),
        current_question: session.current_question().map(str::to_string),
        terminated: session.is_terminated(),
        fields: session.fields.clone(),
        transcript: session.transcript.clone(),
        created_at: session.created_at,
    }))
}
