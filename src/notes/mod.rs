//! Note store access.
//!
//! The diary only needs a handful of operations from Joplin's data API, so
//! they are expressed as the [`NoteStore`] trait. [`JoplinClient`] talks to a
//! running Joplin instance; [`MemoryNoteStore`] keeps notes in process.
//!
//! # Example
//!
//! ```no_run
//! use joplin_diary::notes::{find_existing, JoplinClient};
//! use chrono::NaiveDate;
//!
//! let client = JoplinClient::new("http://localhost:41184", "token");
//! let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! if let Some(note) = find_existing(&client, "folder-id", date)? {
//!     println!("Already written: {}", note.id);
//! }
//! # Ok::<(), joplin_diary::AppError>(())
//! ```

pub mod client;
pub mod memory;

pub use client::JoplinClient;
pub use memory::MemoryNoteStore;

use crate::entry::format_title;
use crate::errors::AppResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Id and title of a note, as returned by folder listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: String,
    pub title: String,
}

/// A full note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub parent_id: String,
}

/// Payload for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub body: String,
    pub parent_id: String,
}

/// A notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub title: String,
}

/// The operations the diary needs from a note store.
///
/// Errors are never retried by callers.
pub trait NoteStore {
    /// Checks that the store is reachable.
    fn ping(&self) -> AppResult<()>;

    /// Lists all notebooks.
    fn list_folders(&self) -> AppResult<Vec<Folder>>;

    /// Lists the notes in one notebook.
    fn list_folder_notes(&self, folder_id: &str) -> AppResult<Vec<NoteSummary>>;

    /// Creates a note and returns it with its assigned id.
    fn create_note(&self, note: &NewNote) -> AppResult<Note>;

    /// Fetches one note. A missing note is an error.
    fn get_note(&self, id: &str) -> AppResult<Note>;

    /// Deletes one note.
    fn delete_note(&self, id: &str) -> AppResult<()>;
}

/// Returns the first note in `folder_id` titled with `date` as `YYYY/MM/DD`.
pub fn find_existing(
    store: &dyn NoteStore,
    folder_id: &str,
    date: NaiveDate,
) -> AppResult<Option<NoteSummary>> {
    let title = format_title(date);
    let existing = store
        .list_folder_notes(folder_id)?
        .into_iter()
        .find(|note| note.title == title);

    debug!(
        "Existing entry for {}: {:?}",
        title,
        existing.as_ref().map(|note| note.id.as_str())
    );
    Ok(existing)
}
