//! Axum route handlers for the notes REST API.

use crate::config::Config;
use crate::error::ApiError;
use crate::store::NoteRepository;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use notes_types::*;
use std::sync::Arc;
use std::time::Instant;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState<R> {
    pub store: Arc<R>,
    pub config: Config,
    pub start_time: Instant,
}

impl<R: NoteRepository> AppState<R> {
    pub fn new(store: Arc<R>, config: Config) -> Self {
        Self {
            store,
            config,
            start_time: Instant::now(),
        }
    }
}

/// Path ids must be positive integers.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidId(raw.to_string())),
    }
}

// =====================================================
// Notes
// =====================================================

/// One page of notes plus the number of matches before paging.
#[derive(Debug)]
pub struct NotePage {
    pub total: usize,
    pub notes: Vec<Note>,
}

impl IntoResponse for NotePage {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [("x-total-count", self.total.to_string())],
            Json(self.notes),
        )
            .into_response()
    }
}

/// Filter by title and cut out the requested page. Input order is preserved.
fn paginate(
    notes: Vec<Note>,
    query: &ListNotesQuery,
    max_page_size: usize,
) -> Result<NotePage, ApiError> {
    let needle = query
        .q
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let matches: Vec<Note> = match needle {
        Some(needle) => notes
            .into_iter()
            .filter(|n| n.title.to_lowercase().contains(&needle))
            .collect(),
        None => notes,
    };
    let total = matches.len();

    if query.page == Some(0) || query.limit == Some(0) {
        return Err(NoteError::InvalidInput("page and limit start at 1".to_string()).into());
    }

    let notes = match query.limit {
        None => matches,
        Some(limit) => {
            let limit = limit.min(max_page_size);
            let page = query.page.unwrap_or(1);
            let offset = (page - 1).saturating_mul(limit);
            matches.into_iter().skip(offset).take(limit).collect()
        }
    };

    Ok(NotePage { total, notes })
}

// GET /api/v1/notes
pub async fn list_notes<R: NoteRepository>(
    State(state): State<Arc<AppState<R>>>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<NotePage, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadBody(e.body_text()))?;
    let notes = state.store.list()?;
    paginate(notes, &query, state.config.max_page_size)
}

// POST /api/v1/notes
pub async fn create_note<R: NoteRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadBody(e.body_text()))?;
    let new_note = NewNote {
        title: normalize_title(&req.title)?,
        content: req.content.trim().to_string(),
        created_at: Utc::now(),
    };

    let note = state.store.create(new_note)?;
    log::debug!("[NOTES] Created note #{}", note.id);
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /api/v1/notes/:id
pub async fn get_note<R: NoteRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&raw_id)?;
    Ok(Json(state.store.get(id)?))
}

// PATCH /api/v1/notes/:id
pub async fn patch_note<R: NoteRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(req) = body.map_err(|e| ApiError::BadBody(e.body_text()))?;
    let now = Utc::now();

    let note = state.store.update_with(id, |note| {
        if let Some(title) = req.title.as_deref() {
            note.title = normalize_title(title)?;
        }
        if let Some(content) = req.content.as_deref() {
            note.content = content.trim().to_string();
        }
        note.updated_at = Some(now);
        Ok(())
    })?;
    log::debug!("[NOTES] Updated note #{}", note.id);
    Ok(Json(note))
}

// DELETE /api/v1/notes/:id
pub async fn delete_note<R: NoteRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.store.delete(id)?;
    log::debug!("[NOTES] Deleted note #{}", id);
    Ok(StatusCode::NO_CONTENT)
}

// =====================================================
// Service
// =====================================================

// GET /api/v1/status
pub async fn status<R: NoteRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        running: true,
        version: VERSION.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        total_notes: state.store.len(),
    })
}

// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": VERSION
    }))
}
