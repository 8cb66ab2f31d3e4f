//! In-process note store.
//!
//! Behaves like the Joplin API for the operations the diary uses, including
//! a 404-style error when a deleted note is fetched. Used by tests and handy
//! for exercising workflows without a running Joplin.

use super::{Folder, NewNote, Note, NoteStore, NoteSummary};
use crate::errors::{AppResult, NoteStoreError};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<Vec<Note>>,
    next_id: Mutex<u64>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding notes with the given ids and titles in `folder_id`.
    pub fn with_notes(folder_id: &str, notes: Vec<NoteSummary>) -> Self {
        let store = Self::new();
        if let Ok(mut stored) = store.notes.lock() {
            stored.extend(notes.into_iter().map(|summary| Note {
                id: summary.id,
                title: summary.title,
                body: String::new(),
                parent_id: folder_id.to_string(),
            }));
        }
        store
    }

    /// Snapshot of every stored note.
    pub fn notes(&self) -> Vec<Note> {
        self.notes
            .lock()
            .map(|notes| notes.clone())
            .unwrap_or_default()
    }

    fn not_found(id: &str) -> NoteStoreError {
        NoteStoreError::Http {
            endpoint: format!("/notes/{}", id),
            status: 404,
            body: String::new(),
        }
    }

    fn poisoned() -> NoteStoreError {
        NoteStoreError::InvalidResponse("note store lock poisoned".to_string())
    }
}

impl NoteStore for MemoryNoteStore {
    fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn list_folders(&self) -> AppResult<Vec<Folder>> {
        let notes = self.notes.lock().map_err(|_| Self::poisoned())?;
        let mut ids: Vec<String> = notes.iter().map(|note| note.parent_id.clone()).collect();
        ids.sort();
        ids.dedup();
        Ok(ids
            .into_iter()
            .map(|id| Folder {
                title: id.clone(),
                id,
            })
            .collect())
    }

    fn list_folder_notes(&self, folder_id: &str) -> AppResult<Vec<NoteSummary>> {
        let notes = self.notes.lock().map_err(|_| Self::poisoned())?;
        Ok(notes
            .iter()
            .filter(|note| note.parent_id == folder_id)
            .map(|note| NoteSummary {
                id: note.id.clone(),
                title: note.title.clone(),
            })
            .collect())
    }

    fn create_note(&self, note: &NewNote) -> AppResult<Note> {
        let mut next_id = self.next_id.lock().map_err(|_| Self::poisoned())?;
        *next_id += 1;
        let created = Note {
            id: format!("mem{:08}", *next_id),
            title: note.title.clone(),
            body: note.body.clone(),
            parent_id: note.parent_id.clone(),
        };
        self.notes
            .lock()
            .map_err(|_| Self::poisoned())?
            .push(created.clone());
        Ok(created)
    }

    fn get_note(&self, id: &str) -> AppResult<Note> {
        let notes = self.notes.lock().map_err(|_| Self::poisoned())?;
        notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id).into())
    }

    fn delete_note(&self, id: &str) -> AppResult<()> {
        let mut notes = self.notes.lock().map_err(|_| Self::poisoned())?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Err(Self::not_found(id).into());
        }
        Ok(())
    }
}
