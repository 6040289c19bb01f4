//! Smoke tests to verify command wiring end to end

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `relctl` with an isolated home directory and an in-memory database.
fn relctl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relctl").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("RELCTL_DATABASE_URL")
        .env_remove("RUST_LOG")
        .arg("--database-url")
        .arg("sqlite::memory:");
    cmd
}

// === Help Tests ===

#[test]
fn test_roster_add_help() {
    let mut cmd = Command::cargo_bin("relctl").unwrap();
    cmd.arg("roster").arg("add").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Guest ID"))
        .stdout(predicate::str::contains("Role"));
}

#[test]
fn test_projects_with_employee_help() {
    let mut cmd = Command::cargo_bin("relctl").unwrap();
    cmd.arg("projects").arg("with-employee").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("case-sensitive"));
}

#[test]
fn test_library_page_help() {
    let mut cmd = Command::cargo_bin("relctl").unwrap();
    cmd.arg("library").arg("page").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--per-page"));
}

// === Roster Tests ===

#[test]
fn test_roster_demo_ranks_guests() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .arg("roster")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe | 3"))
        .stdout(predicate::str::contains("Michael Brown | 1"));
}

#[test]
fn test_roster_add_missing_guest_adds_nothing() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .args(["roster", "add", "99", "1", "vip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing added"))
        .stderr(predicate::str::contains("Guest not found"));
}

#[test]
fn test_roster_rejects_unknown_role() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .args(["roster", "add", "1", "1", "headliner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid role"));
}

#[test]
fn test_roster_attendees_json() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .args(["--json", "roster", "attendees", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"full_name\": \"John Doe\""))
        .stdout(predicate::str::contains("\"full_name\": \"Jane Smith\""));
}

// === Projects Tests ===

#[test]
fn test_projects_demo_keeps_beta() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .args(["projects", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project #1 Project Alpha"))
        .stdout(predicate::str::contains("#2 Project Beta"));
}

#[test]
fn test_projects_delete_missing_fails() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .args(["projects", "delete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to delete project 9"));
}

// === Library Tests ===

#[test]
fn test_library_count_genre_json() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .args(["--json", "library", "count-genre", "Fantasy"])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn test_library_page_three() {
    let home = TempDir::new().unwrap();
    relctl(&home)
        .args(["library", "page", "--page", "3", "--per-page", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 3/4 (19 books total)"))
        .stdout(predicate::str::contains("#11 The Children of Dune"));
}

#[test]
fn test_library_seed_is_idempotent_on_disk() {
    let home = TempDir::new().unwrap();
    let url = format!("sqlite://{}", home.path().join("data/relctl.db").display());

    for expected in ["Seeded 5 genres, 7 authors, 19 books", "Library already seeded"] {
        Command::cargo_bin("relctl")
            .unwrap()
            .env("HOME", home.path())
            .args(["--database-url", &url, "library", "seed"])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

// === Config Tests ===

#[test]
fn test_config_show_uses_env_url() {
    let home = TempDir::new().unwrap();
    Command::cargo_bin("relctl")
        .unwrap()
        .env("HOME", home.path())
        .env("RELCTL_DATABASE_URL", "sqlite://from-env.db")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite://from-env.db"));
}

#[test]
fn test_config_file_sets_database_url() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".relctl");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "database_url = \"sqlite://from-file.db\"\n",
    )
    .unwrap();

    Command::cargo_bin("relctl")
        .unwrap()
        .env("HOME", home.path())
        .env_remove("RELCTL_DATABASE_URL")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite://from-file.db"));
}
