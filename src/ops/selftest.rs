//! End-to-end self-test against the configured note store.
//!
//! Creates an entry for a far-future date, reads it back, validates it,
//! deletes it, and confirms it is gone. Alongside, three edge dates (a leap
//! day and both ends of a year) are composed without writing.

use crate::config::Config;
use crate::constants;
use crate::entry::{validate_format, EntryComposer};
use crate::errors::{AppError, AppResult};
use crate::notes::{find_existing, NewNote, NoteStore};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Outcome of composing one edge date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCaseResult {
    pub date: NaiveDate,
    /// `Err` holds a description of what went wrong.
    pub outcome: Result<(), String>,
}

/// Everything the self-test found out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    /// `Err` holds the error that stopped the create/fetch/validate/delete cycle.
    pub cycle: Result<(), String>,
    /// The deleted test note could no longer be fetched.
    pub cleanup_verified: bool,
    pub edge_cases: Vec<EdgeCaseResult>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.cycle.is_ok()
            && self.cleanup_verified
            && self.edge_cases.iter().all(|case| case.outcome.is_ok())
    }
}

/// Dates composed in dry-run mode during the self-test.
pub fn edge_dates() -> Vec<NaiveDate> {
    [(2024, 2, 29), (2025, 1, 1), (2025, 12, 31)]
        .into_iter()
        .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

/// Date of the note the self-test creates and deletes.
pub fn self_test_date() -> Option<NaiveDate> {
    let (y, m, d) = constants::SELF_TEST_DATE;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Runs the self-test, printing progress as it goes.
///
/// Never returns an error: failures are recorded in the report.
pub fn run_self_test(
    config: &Config,
    store: &dyn NoteStore,
    composer: &EntryComposer<'_>,
) -> SelfTestReport {
    println!("Running integration test...");

    let mut report = SelfTestReport {
        cycle: Ok(()),
        cleanup_verified: false,
        edge_cases: Vec::new(),
    };

    match run_cycle(config, store, composer, &mut report) {
        Ok(()) => println!("✓ Integration test passed!"),
        Err(e) => {
            warn!("Self-test failed: {}", e);
            println!("✗ Integration test failed: {}", e);
            report.cycle = Err(e.to_string());
        }
    }

    report
}

fn run_cycle(
    config: &Config,
    store: &dyn NoteStore,
    composer: &EntryComposer<'_>,
    report: &mut SelfTestReport,
) -> AppResult<()> {
    let date = self_test_date()
        .ok_or_else(|| AppError::InvalidDate(format!("{:?}", constants::SELF_TEST_DATE)))?;

    if let Some(leftover) = find_existing(store, &config.folder_id, date)? {
        println!("Test entry already exists, deleting first...");
        store.delete_note(&leftover.id)?;
    }

    println!("Creating test entry...");
    let entry = composer.compose(date, constants::SELF_TEST_CONTENT, None)?;
    let created = store.create_note(&NewNote {
        title: entry.title.clone(),
        body: entry.body(),
        parent_id: config.folder_id.clone(),
    })?;
    info!("Created self-test note {}", created.id);

    println!("Verifying entry format...");
    let fetched = store.get_note(&created.id)?;
    validate_format(&fetched.body, date)?;
    println!("✓ Entry format validation passed");

    for edge_date in edge_dates() {
        let outcome = composer
            .compose(edge_date, constants::EDGE_CASE_CONTENT, None)
            .and_then(|entry| validate_format(&entry.body(), edge_date).map_err(AppError::from));
        match &outcome {
            Ok(()) => println!("✓ Edge case validation passed for {}", edge_date),
            Err(e) => println!("✗ Edge case failed for {}: {}", edge_date, e),
        }
        report.edge_cases.push(EdgeCaseResult {
            date: edge_date,
            outcome: outcome.map_err(|e| e.to_string()),
        });
    }

    println!("Cleaning up test entry...");
    store.delete_note(&created.id)?;

    // The note must be gone: a failing fetch is the expected result here.
    match store.get_note(&created.id) {
        Ok(_) => println!("✗ Test entry was not properly deleted"),
        Err(_) => {
            println!("✓ Test entry successfully deleted");
            report.cleanup_verified = true;
        }
    }

    Ok(())
}
