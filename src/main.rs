/*!
# joplin-diary

Writes today's (or a given day's) diary entry into a Joplin notebook.

This file contains the main application flow: it parses the command line,
sets up logging, loads the configuration and hands off to the selected
workflow.

## Usage

```
joplin-diary [OPTIONS] [DATE]

Arguments:
  [DATE]                 Date of the entry (format: YYYY-MM-DD, defaults to today)

Options:
      --dry-run              Show the entry that would be created without writing it
      --test                 Run an end-to-end test against Joplin and clean up afterwards
      --setup                Interactively configure the Joplin connection
      --location <LOCATION>  Use this location instead of looking one up
  -v, --verbose              Print verbose output
  -h, --help                 Print help information
  -V, --version              Print version information
```

## Configuration

Settings are read from `~/.config/joplin-diary/config.json` (or the file
named by `JOPLIN_DIARY_CONFIG`). Each setting can be overridden with an
environment variable:
- `JOPLIN_DIARY_TOKEN`: Joplin Web Clipper API token
- `JOPLIN_DIARY_BASE_URL`: Joplin data API address (defaults to "http://localhost:41184")
- `JOPLIN_DIARY_FOLDER_ID`: Notebook the entries are filed in
- `JOPLIN_DIARY_DEFAULT_LOCATION`: Location used when no better one is known
- `JOPLIN_DIARY_WEATHER_URL`: Weather service (defaults to "wttr.in")
- `JOPLIN_DIARY_LOCATION_HELPER`: Location helper program (macOS only)
*/

use chrono::Local;
use joplin_diary::cli::CliArgs;
use joplin_diary::config::Config;
use joplin_diary::constants;
use joplin_diary::entry::EntryComposer;
use joplin_diary::errors::{AppError, AppResult};
use joplin_diary::notes::JoplinClient;
use joplin_diary::ops::{create_entry, run_self_test, CreateOptions};
use joplin_diary::prompt::TerminalPrompt;
use joplin_diary::setup::run_setup;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output and
/// the default is warnings only. Logs go to stderr so they never mix with
/// the entry preview on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        constants::VERBOSE_LOG_LEVEL
    } else {
        constants::DEFAULT_LOG_LEVEL
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json = std::env::var(constants::ENV_VAR_LOG_FORMAT)
        .map(|value| value.eq_ignore_ascii_case(constants::LOG_FORMAT_JSON))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

/// The main entry point for the joplin-diary application.
///
/// An operator interrupt (Ctrl-C) at any point ends the run with
/// "Cancelled." and a zero exit status. Nothing is written to Joplin until
/// the entry is fully composed, so an interrupt never leaves a partial note.
fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);
    debug!("CLI arguments: {:?}", args);

    if let Err(e) = ctrlc::set_handler(|| {
        println!("\nCancelled.");
        std::process::exit(0);
    }) {
        warn!("Could not install interrupt handler: {}", e);
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(AppError::Cancelled) => {
            println!("Cancelled.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected mode. `Ok(false)` means the self-test ran but failed.
fn run(args: &CliArgs) -> AppResult<bool> {
    let prompt = TerminalPrompt;

    if args.setup {
        let path = Config::config_path()?;
        run_setup(&prompt, &path)?;
        return Ok(true);
    }

    let date = args.parse_date(Local::now().date_naive())?;

    info!("Loading configuration");
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let store = JoplinClient::from_config(&config);
    let composer = EntryComposer::from_config(&config, &prompt);

    if args.test {
        let report = run_self_test(&config, &store, &composer);
        return Ok(report.passed());
    }

    let options = CreateOptions {
        date,
        dry_run: args.dry_run,
        location_override: args.location.clone(),
    };
    create_entry(&config, &store, &composer, &prompt, &options)?;
    Ok(true)
}
