//! Shared types for the notes service and its HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =====================================================
// Domain Types
// =====================================================

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// `None` until the note has been updated at least once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A note that has not been assigned an id yet.
///
/// Title and content are expected to be trimmed and validated already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewNote {
    /// Attach the store-assigned id.
    pub fn into_note(self, id: i64) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

// =====================================================
// Errors
// =====================================================

/// Logical failures of note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// No live note with this id
    NotFound(i64),
    /// A value broke a domain constraint (e.g. empty title)
    InvalidInput(String),
    /// Anything else; the in-memory store never produces this
    Internal(String),
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::NotFound(id) => write!(f, "note #{} not found", id),
            NoteError::InvalidInput(reason) => write!(f, "invalid input: {}", reason),
            NoteError::Internal(reason) => write!(f, "internal error: {}", reason),
        }
    }
}

impl std::error::Error for NoteError {}

/// Trim a title and reject it if nothing is left.
pub fn normalize_title(raw: &str) -> Result<String, NoteError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(NoteError::InvalidInput("title must not be empty".to_string()));
    }
    Ok(title.to_string())
}

// =====================================================
// Request Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Query string for `GET /api/v1/notes`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListNotesQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Case-insensitive substring match on the title
    pub q: Option<String>,
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub version: String,
    pub uptime_secs: u64,
    pub total_notes: usize,
}
