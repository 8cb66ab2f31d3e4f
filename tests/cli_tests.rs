use mockito::{Matcher, Server};
use predicates::prelude::*;
use serial_test::serial;
use tempfile::tempdir;

use test_helpers::{base_diary_command, configured_diary_command, TEST_TOKEN};

fn token_query() -> Matcher {
    Matcher::UrlEncoded("token".into(), TEST_TOKEN.into())
}

fn empty_folder(server: &mut Server) -> mockito::Mock {
    server
        .mock("GET", "/folders/diary/notes")
        .match_query(token_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [], "has_more": false}"#)
        .create()
}

#[test]
fn test_cli_help() {
    let home = tempdir().unwrap();
    base_diary_command(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--location"));
}

#[test]
fn test_cli_invalid_date() {
    let home = tempdir().unwrap();
    base_diary_command(home.path())
        .arg("2025-13-45")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_cli_missing_token() {
    let home = tempdir().unwrap();
    base_diary_command(home.path())
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_cli_conflicting_modes() {
    let home = tempdir().unwrap();
    base_diary_command(home.path())
        .args(["--test", "--setup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
#[serial]
fn test_cli_dry_run_writes_nothing() {
    let home = tempdir().unwrap();
    let mut server = Server::new();
    let list = empty_folder(&mut server);
    let create = server.mock("POST", "/notes").expect(0).create();

    configured_diary_command(home.path(), &server.url())
        .args(["2025-06-01", "--dry-run", "--location", "Dingle"])
        .write_stdin("Drizzle 9C\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN - Would create entry:"))
        .stdout(predicate::str::contains("Title: 2025/06/01"))
        .stdout(predicate::str::contains(
            "2025/06/01\n\nDrizzle 9C\nSunday\nDingle\n\n- \n- \n- ",
        ));

    list.assert();
    create.assert();
}

#[test]
#[serial]
fn test_cli_creates_entry() {
    let home = tempdir().unwrap();
    let mut server = Server::new();
    let list = empty_folder(&mut server);
    let create = server
        .mock("POST", "/notes")
        .match_query(token_query())
        .match_body(Matcher::PartialJson(serde_json::json!({
            "title": "2024/02/29",
            "parent_id": "diary",
            "body": "2024/02/29\n\nDrizzle 9C\nThursday\nHome\n\n- walked the dog",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "new1", "title": "2024/02/29", "parent_id": "diary"}"#)
        .create();

    configured_diary_command(home.path(), &server.url())
        .arg("2024-02-29")
        .write_stdin("- walked the dog\n\n\nDrizzle 9C\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Diary entry created successfully!"))
        .stdout(predicate::str::contains("Note ID: new1"))
        .stdout(predicate::str::contains("Location: Home (default)"));

    list.assert();
    create.assert();
}

#[test]
#[serial]
fn test_cli_declined_overwrite_fails() {
    let home = tempdir().unwrap();
    let mut server = Server::new();
    let list = server
        .mock("GET", "/folders/diary/notes")
        .match_query(token_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": "old1", "title": "2025/06/01"}], "has_more": false}"#)
        .create();
    let delete = server.mock("DELETE", "/notes/old1").expect(0).create();
    let create = server.mock("POST", "/notes").expect(0).create();

    configured_diary_command(home.path(), &server.url())
        .arg("2025-06-01")
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("already exists (ID: old1)"))
        .stderr(predicate::str::contains("was not overwritten"));

    list.assert();
    delete.assert();
    create.assert();
}

#[test]
#[serial]
fn test_cli_end_of_input_cancels_without_writing() {
    let home = tempdir().unwrap();
    let mut server = Server::new();
    let _list = empty_folder(&mut server);
    let create = server.mock("POST", "/notes").expect(0).create();

    // Content ends at end of input; the manual weather prompt then gets nothing
    configured_diary_command(home.path(), &server.url())
        .arg("2025-06-01")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    create.assert();
}

#[test]
#[serial]
fn test_cli_self_test_reports_failure() {
    let home = tempdir().unwrap();
    let mut server = Server::new();
    let _list = empty_folder(&mut server);
    let _create = server
        .mock("POST", "/notes")
        .match_query(token_query())
        .with_status(403)
        .with_body("Invalid token")
        .create();

    configured_diary_command(home.path(), &server.url())
        .arg("--test")
        .write_stdin("Drizzle 9C\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Integration test failed"));
}

#[test]
#[serial]
fn test_cli_unreachable_joplin() {
    let home = tempdir().unwrap();

    configured_diary_command(home.path(), "http://127.0.0.1:9")
        .args(["2025-06-01", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Joplin API unreachable"));
}
