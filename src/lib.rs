/*!
# joplin-diary

A small command-line tool that writes one diary note per day into a Joplin
notebook through the Joplin data API. Each entry starts with a fixed header
(date, weather, weekday, location) followed by the day's notes.

## Core Features

- Compose and validate the entry layout for any date
- Look up weather from a text weather service, falling back to manual input
- Look up the current location through an optional helper program
- Create or overwrite the entry for a day, with a dry-run mode
- End-to-end self-test against the running Joplin instance
- Interactive setup of the connection settings

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading, validation and saving
- `errors`: Error handling infrastructure
- `entry`: Entry layout, validation and composition
- `resolve`: Weather and location fallback chains
- `notes`: Note store abstraction and the Joplin API client
- `prompt`: Operator input
- `ops`: The create and self-test workflows
- `setup`: Interactive configuration

## Usage Example

```rust,no_run
use joplin_diary::entry::EntryComposer;
use joplin_diary::notes::JoplinClient;
use joplin_diary::ops::{create_entry, CreateOptions};
use joplin_diary::prompt::TerminalPrompt;
use joplin_diary::Config;

fn main() -> joplin_diary::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let store = JoplinClient::from_config(&config);
    let prompt = TerminalPrompt;
    let composer = EntryComposer::from_config(&config, &prompt);

    let options = CreateOptions {
        date: chrono::Local::now().date_naive(),
        dry_run: true,
        location_override: None,
    };
    create_entry(&config, &store, &composer, &prompt, &options)?;
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Diary entry layout and composition
pub mod entry;
/// Error types and utilities for error handling
pub mod errors;
/// Note store abstraction and Joplin client
pub mod notes;
/// High-level workflows
pub mod ops;
/// Operator input
pub mod prompt;
/// Weather and location resolution
pub mod resolve;
/// Interactive first-run configuration
pub mod setup;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
