use crate::constants;
use crate::entry;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use clap::Parser;

/// Compose a daily diary entry and file it in Joplin
#[derive(Parser, Debug)]
#[clap(name = constants::APP_NAME, about = constants::APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Date of the entry (format: YYYY-MM-DD, defaults to today)
    #[clap(value_name = "DATE")]
    pub date: Option<String>,

    /// Show the entry that would be created without writing it
    #[clap(long)]
    pub dry_run: bool,

    /// Run an end-to-end test against Joplin and clean up afterwards
    #[clap(long, conflicts_with_all = &["setup", "dry_run", "date", "location"])]
    pub test: bool,

    /// Interactively configure the Joplin connection
    #[clap(long, conflicts_with_all = &["dry_run", "date", "location"])]
    pub setup: bool,

    /// Use this location instead of looking one up
    #[clap(long, value_name = "LOCATION")]
    pub location: Option<String>,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// Date the entry is for: the positional argument if given, else `today`.
    pub fn parse_date(&self, today: NaiveDate) -> AppResult<NaiveDate> {
        match &self.date {
            Some(raw) => {
                entry::parse_date(raw).map_err(|_| AppError::InvalidDate(raw.clone()))
            }
            None => Ok(today),
        }
    }
}
