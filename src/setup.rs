//! Interactive first-run setup.
//!
//! Walks the operator through the connection settings, checks them against
//! the running Joplin instance, lists notebooks to pick the diary folder
//! from, and writes the config file.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::notes::{JoplinClient, NoteStore};
use crate::prompt::OperatorPrompt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prompts the user for a yes/no answer with a default.
///
/// # Arguments
///
/// * `prompt` - Where to read the answer from
/// * `question` - The question to ask
/// * `default` - Default answer if user just presses Enter
pub fn prompt_yes_no(prompt: &dyn OperatorPrompt, question: &str, default: bool) -> AppResult<bool> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };

    loop {
        let answer = prompt.ask(&format!("{} {} ", question, suffix))?;
        match answer.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer yes or no."),
        }
    }
}

/// Asks for a value, keeping `current` when the answer is empty.
fn ask_with_default(prompt: &dyn OperatorPrompt, label: &str, current: &str) -> AppResult<String> {
    let message = if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, current)
    };
    let answer = prompt.ask(&message)?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer.to_string()
    })
}

/// Runs the interactive setup and saves the result to `path`.
///
/// Existing settings at `path` (and environment overrides) are offered as
/// defaults. The API token is read without echo and is never displayed.
///
/// # Errors
///
/// - `AppError::Cancelled` if the operator aborts a prompt or declines to
///   continue without a working connection
/// - `AppError::Config` if the collected settings are invalid
/// - `AppError::Io` if the config file cannot be written
pub fn run_setup(prompt: &dyn OperatorPrompt, path: &Path) -> AppResult<Config> {
    let current = match Config::load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring unreadable config at {:?}: {}", path, e);
            Config::default()
        }
    };

    println!("Joplin diary setup");
    println!("Settings will be saved to {}", path.display());
    println!();

    let base_url = ask_with_default(prompt, "Joplin API address", &current.base_url)?;

    let token_hint = if current.token.is_empty() {
        "API token (Joplin > Options > Web Clipper): "
    } else {
        "API token (leave empty to keep the current one): "
    };
    let token = match prompt.ask_secret(token_hint)?.trim() {
        "" => current.token.clone(),
        entered => entered.to_string(),
    };

    let client = JoplinClient::new(base_url.clone(), token.clone());
    match check_connection(&client) {
        Ok(()) => {}
        Err(e) => {
            println!("Could not talk to Joplin: {}", e);
            if !prompt_yes_no(prompt, "Continue anyway?", false)? {
                return Err(AppError::Cancelled);
            }
        }
    }

    let folder_id = ask_with_default(prompt, "Diary notebook id", &current.folder_id)?;
    let default_location =
        ask_with_default(prompt, "Default location", &current.default_location)?;
    let helper = ask_with_default(
        prompt,
        "Location helper (macOS only)",
        &current.location_helper.to_string_lossy(),
    )?;

    let config = Config {
        token,
        base_url,
        folder_id,
        default_location,
        weather_url: current.weather_url,
        location_helper: PathBuf::from(helper),
    };
    config.validate()?;

    if !prompt_yes_no(prompt, "Save configuration?", true)? {
        return Err(AppError::Cancelled);
    }

    config.save(path)?;
    info!("Setup complete");
    println!("✓ Configuration saved to {}", path.display());
    Ok(config)
}

/// Pings Joplin and prints its notebooks so the diary folder can be picked.
fn check_connection(client: &JoplinClient) -> AppResult<()> {
    client.ping()?;
    let folders = client.list_folders()?;
    debug!("Found {} notebooks", folders.len());

    println!("✓ Connected to Joplin. Notebooks:");
    for folder in &folders {
        println!("  {}  {}", folder.id, folder.title);
    }
    println!();
    Ok(())
}
