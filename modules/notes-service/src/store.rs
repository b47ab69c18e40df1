//! In-memory note storage.
//!
//! `MemNoteStore` keeps every note and the id counter behind a single mutex.
//! Each operation takes the lock once, does its work without any I/O, and
//! hands back clones, so callers never see a half-applied change.

use notes_types::{NewNote, Note, NoteError};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Storage capability consumed by the HTTP layer.
pub trait NoteRepository: Send + Sync + 'static {
    /// Assign the next id and insert the note.
    fn create(&self, note: NewNote) -> Result<Note, NoteError>;

    /// All live notes in ascending id order.
    fn list(&self) -> Result<Vec<Note>, NoteError>;

    fn get(&self, id: i64) -> Result<Note, NoteError>;

    /// Replace an existing note. `id` and `created_at` are kept from the stored record.
    fn update(&self, note: Note) -> Result<Note, NoteError>;

    /// Read-modify-write a note under a single lock acquisition.
    ///
    /// The closure edits a copy; the copy is committed only if it returns `Ok`.
    fn update_with<F>(&self, id: i64, f: F) -> Result<Note, NoteError>
    where
        F: FnOnce(&mut Note) -> Result<(), NoteError>;

    fn delete(&self, id: i64) -> Result<(), NoteError>;

    /// Number of live notes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
struct Table {
    notes: BTreeMap<i64, Note>,
    /// Last id handed out; never decremented
    last_id: i64,
}

#[derive(Default)]
pub struct MemNoteStore {
    table: Mutex<Table>,
}

impl MemNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteRepository for MemNoteStore {
    fn create(&self, note: NewNote) -> Result<Note, NoteError> {
        let mut table = self.table.lock();
        table.last_id += 1;
        let note = note.into_note(table.last_id);
        table.notes.insert(note.id, note.clone());
        Ok(note)
    }

    fn list(&self) -> Result<Vec<Note>, NoteError> {
        let table = self.table.lock();
        Ok(table.notes.values().cloned().collect())
    }

    fn get(&self, id: i64) -> Result<Note, NoteError> {
        let table = self.table.lock();
        table.notes.get(&id).cloned().ok_or(NoteError::NotFound(id))
    }

    fn update(&self, mut note: Note) -> Result<Note, NoteError> {
        let mut table = self.table.lock();
        let stored = table
            .notes
            .get_mut(&note.id)
            .ok_or(NoteError::NotFound(note.id))?;
        note.created_at = stored.created_at;
        *stored = note.clone();
        Ok(note)
    }

    fn update_with<F>(&self, id: i64, f: F) -> Result<Note, NoteError>
    where
        F: FnOnce(&mut Note) -> Result<(), NoteError>,
    {
        let mut table = self.table.lock();
        let stored = table.notes.get_mut(&id).ok_or(NoteError::NotFound(id))?;
        let mut draft = stored.clone();
        f(&mut draft)?;
        draft.id = stored.id;
        draft.created_at = stored.created_at;
        *stored = draft.clone();
        Ok(draft)
    }

    fn delete(&self, id: i64) -> Result<(), NoteError> {
        let mut table = self.table.lock();
        match table.notes.remove(&id) {
            Some(_) => Ok(()),
            None => Err(NoteError::NotFound(id)),
        }
    }

    fn len(&self) -> usize {
        self.table.lock().notes.len()
    }
}
