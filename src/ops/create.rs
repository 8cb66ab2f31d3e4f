//! Create (or overwrite) the diary entry for one day.

use crate::config::Config;
use crate::constants;
use crate::entry::{format_title, DiaryEntry, EntryComposer};
use crate::errors::{AppError, AppResult};
use crate::notes::{find_existing, NewNote, NoteStore};
use crate::prompt::{capture_content, confirm, OperatorPrompt};
use chrono::NaiveDate;
use tracing::{debug, info};

/// What the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Day the entry is for.
    pub date: NaiveDate,
    /// Compose and validate but do not write.
    pub dry_run: bool,
    /// Location to use instead of resolving one.
    pub location_override: Option<String>,
}

/// Result of [`create_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The entry was written; `note_id` is the id Joplin assigned.
    Created { note_id: String, entry: DiaryEntry },
    /// Nothing was written.
    DryRun { entry: DiaryEntry },
}

impl CreateOutcome {
    pub fn entry(&self) -> &DiaryEntry {
        match self {
            CreateOutcome::Created { entry, .. } | CreateOutcome::DryRun { entry } => entry,
        }
    }
}

/// Creates the diary entry for `options.date`.
///
/// # Flow
///
/// 1. Look for an entry with the same title in the diary notebook
/// 2. If one exists, ask before overwriting (dry runs only report it)
/// 3. Capture the day's content from the operator (skipped for dry runs)
/// 4. Compose and validate the entry
/// 5. Create the new entry, then delete the old one if overwriting
///
/// Nothing is written until the entry has been composed, so a cancelled
/// prompt leaves the notebook untouched. A failed create keeps the old entry.
///
/// # Errors
///
/// - `AppError::OverwriteDeclined` if the operator keeps the existing entry
/// - `AppError::Cancelled` if the operator interrupts a prompt
/// - `AppError::Format` if the composed entry fails validation
/// - `AppError::NoteStore` for any Joplin API failure
pub fn create_entry(
    config: &Config,
    store: &dyn NoteStore,
    composer: &EntryComposer<'_>,
    prompt: &dyn OperatorPrompt,
    options: &CreateOptions,
) -> AppResult<CreateOutcome> {
    let date = options.date;
    let title = format_title(date);

    let existing = find_existing(store, &config.folder_id, date)?;
    if let Some(note) = &existing {
        println!(
            "Diary entry for {} already exists (ID: {})",
            date.format(constants::DATE_FORMAT_ISO),
            note.id
        );
        if options.dry_run {
            println!("Dry run: the existing entry would need to be overwritten.");
        } else if !confirm(prompt, "Overwrite? (y/N): ")? {
            return Err(AppError::OverwriteDeclined(title));
        }
    }

    println!(
        "Creating diary entry for {}",
        date.format(constants::BANNER_DATE_FORMAT)
    );
    println!("Gathering automatic information...");

    let content = if options.dry_run {
        String::new()
    } else {
        println!();
        println!("Add your diary content below.");
        println!("Start each activity with '- ' (dash space)");
        println!("Use tabs for sub-bullets");
        println!("Press Enter twice to finish:");
        println!();
        capture_content(prompt)?
    };
    debug!("Captured {} content lines", content.lines().count());

    let entry = composer.compose(date, &content, options.location_override.as_deref())?;

    if options.dry_run {
        println!("DRY RUN - Would create entry:");
        println!("Title: {}", entry.title);
        println!("Body:\n{}", entry.body());
        return Ok(CreateOutcome::DryRun { entry });
    }

    let created = store.create_note(&NewNote {
        title: entry.title.clone(),
        body: entry.body(),
        parent_id: config.folder_id.clone(),
    })?;
    info!("Created diary entry {}", created.id);

    // The old entry goes only once its replacement exists.
    if let Some(note) = existing {
        info!("Deleting replaced entry {}", note.id);
        store.delete_note(&note.id)?;
    }

    println!();
    println!("✓ Diary entry created successfully!");
    println!("Title: {}", entry.title);
    println!("Note ID: {}", created.id);
    println!("Location: {} ({})", entry.location, entry.location_source);

    Ok(CreateOutcome::Created {
        note_id: created.id,
        entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LocationSource;
    use crate::errors::NoteStoreError;
    use crate::notes::{MemoryNoteStore, NoteSummary};
    use crate::prompt::ScriptedPrompt;
    use crate::resolve::{DefaultProvider, WeatherQuery, WeatherResolver, WeatherSource};

    struct Sunny;

    impl WeatherSource for Sunny {
        fn fetch(&self, _query: &WeatherQuery) -> Option<String> {
            Some("Sunny +18°C".to_string())
        }
    }

    fn config() -> Config {
        Config {
            token: "token".to_string(),
            folder_id: "diary".to_string(),
            ..Config::default()
        }
    }

    fn composer(prompt: &ScriptedPrompt) -> EntryComposer<'_> {
        EntryComposer::new(
            WeatherResolver::new(Box::new(Sunny), "Home"),
            Box::new(DefaultProvider::new("Home")),
            prompt,
        )
    }

    fn options(dry_run: bool) -> CreateOptions {
        CreateOptions {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            dry_run,
            location_override: None,
        }
    }

    fn existing_store() -> MemoryNoteStore {
        MemoryNoteStore::with_notes(
            "diary",
            vec![NoteSummary {
                id: "old".to_string(),
                title: "2025/06/01".to_string(),
            }],
        )
    }

    #[test]
    fn test_creates_entry_with_captured_content() {
        let store = MemoryNoteStore::new();
        let prompt = ScriptedPrompt::new(vec!["- swim", "\t- cold", "", ""]);
        let composer = composer(&prompt);

        let outcome = create_entry(&config(), &store, &composer, &prompt, &options(false)).unwrap();

        let CreateOutcome::Created { note_id, entry } = outcome else {
            panic!("Expected a created entry");
        };
        let stored = store.get_note(&note_id).unwrap();
        assert_eq!(stored.title, "2025/06/01");
        assert_eq!(stored.parent_id, "diary");
        assert_eq!(
            stored.body,
            "2025/06/01\n\nSunny +18°C\nSunday\nHome\n\n- swim\n\t- cold"
        );
        assert_eq!(entry.location_source, LocationSource::Default);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let store = MemoryNoteStore::new();
        let prompt = ScriptedPrompt::new(Vec::<String>::new());
        let composer = composer(&prompt);

        let outcome = create_entry(&config(), &store, &composer, &prompt, &options(true)).unwrap();

        assert!(matches!(outcome, CreateOutcome::DryRun { .. }));
        assert_eq!(&outcome.entry().body_lines[6..], &["- ", "- ", "- "]);
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_dry_run_does_not_prompt_for_existing_entry() {
        let store = existing_store();
        let prompt = ScriptedPrompt::new(Vec::<String>::new());
        let composer = composer(&prompt);

        let outcome = create_entry(&config(), &store, &composer, &prompt, &options(true)).unwrap();

        assert!(matches!(outcome, CreateOutcome::DryRun { .. }));
        assert!(prompt.asked().is_empty());
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn test_declined_overwrite_keeps_existing() {
        let store = existing_store();
        let prompt = ScriptedPrompt::new(vec!["n"]);
        let composer = composer(&prompt);

        let result = create_entry(&config(), &store, &composer, &prompt, &options(false));

        assert!(matches!(result, Err(AppError::OverwriteDeclined(ref title)) if title == "2025/06/01"));
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.notes()[0].id, "old");
    }

    #[test]
    fn test_confirmed_overwrite_replaces_existing() {
        let store = existing_store();
        let prompt = ScriptedPrompt::new(vec!["y", "- new day", "", ""]);
        let composer = composer(&prompt);

        let outcome = create_entry(&config(), &store, &composer, &prompt, &options(false)).unwrap();

        let notes = store.notes();
        assert_eq!(notes.len(), 1);
        assert_ne!(notes[0].id, "old");
        assert!(matches!(outcome, CreateOutcome::Created { ref note_id, .. } if *note_id == notes[0].id));
        assert!(notes[0].body.ends_with("- new day"));
    }

    #[test]
    fn test_cancelled_weather_prompt_leaves_existing_entry() {
        struct Offline;
        impl WeatherSource for Offline {
            fn fetch(&self, _query: &WeatherQuery) -> Option<String> {
                None
            }
        }

        let store = existing_store();
        // Confirm overwrite, finish content by end of input, then no weather answer
        let prompt = ScriptedPrompt::new(vec!["y"]);
        let composer = EntryComposer::new(
            WeatherResolver::new(Box::new(Offline), "Home"),
            Box::new(DefaultProvider::new("Home")),
            &prompt,
        );

        let result = create_entry(&config(), &store, &composer, &prompt, &options(false));

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(store.notes()[0].id, "old");
    }

    /// Store whose creates are rejected by the server.
    struct RejectingStore(MemoryNoteStore);

    impl NoteStore for RejectingStore {
        fn ping(&self) -> AppResult<()> {
            Ok(())
        }
        fn list_folders(&self) -> AppResult<Vec<crate::notes::Folder>> {
            self.0.list_folders()
        }
        fn list_folder_notes(&self, folder_id: &str) -> AppResult<Vec<NoteSummary>> {
            self.0.list_folder_notes(folder_id)
        }
        fn create_note(&self, _note: &NewNote) -> AppResult<crate::notes::Note> {
            Err(NoteStoreError::Http {
                endpoint: "/notes".to_string(),
                status: 500,
                body: "Internal Server Error".to_string(),
            }
            .into())
        }
        fn get_note(&self, id: &str) -> AppResult<crate::notes::Note> {
            self.0.get_note(id)
        }
        fn delete_note(&self, id: &str) -> AppResult<()> {
            self.0.delete_note(id)
        }
    }

    #[test]
    fn test_failed_create_keeps_existing_entry() {
        let store = RejectingStore(existing_store());
        let prompt = ScriptedPrompt::new(vec!["y", "- new", "", ""]);
        let composer = composer(&prompt);

        let result = create_entry(&config(), &store, &composer, &prompt, &options(false));

        assert!(matches!(
            result,
            Err(AppError::NoteStore(NoteStoreError::Http { status: 500, .. }))
        ));
        let notes = store.0.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "old");
    }

    #[test]
    fn test_location_override_is_written() {
        let store = MemoryNoteStore::new();
        let prompt = ScriptedPrompt::new(vec!["", ""]);
        let composer = composer(&prompt);
        let options = CreateOptions {
            location_override: Some("Dingle".to_string()),
            ..options(false)
        };

        let outcome = create_entry(&config(), &store, &composer, &prompt, &options).unwrap();

        assert_eq!(outcome.entry().location, "Dingle");
        assert_eq!(outcome.entry().location_source, LocationSource::Override);
        assert!(store.notes()[0].body.contains("\nDingle\n"));
    }
}
