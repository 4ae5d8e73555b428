use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Nothing listens on the discard port, so every request fails fast
const UNREACHABLE_API: &str = "http://127.0.0.1:9/v0";

fn quiet_hn_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quiet-hn").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("QUIET_HN_API_URL")
        .env_remove("QUIET_HN_NUM_STORIES")
        .env_remove("QUIET_HN_CACHE_TTL_SECS")
        .env_remove("QUIET_HN_CONCURRENCY")
        .env_remove("QUIET_HN_TIMEOUT_SECS");
    cmd
}

#[test]
fn test_top_help_shows_fetch_flags() {
    let dir = TempDir::new().unwrap();

    quiet_hn_cmd(&dir)
        .arg("top")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--num-stories"))
        .stdout(predicate::str::contains("--ttl"))
        .stdout(predicate::str::contains("--concurrency"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_watch_help_shows_interval_and_rounds() {
    let dir = TempDir::new().unwrap();

    quiet_hn_cmd(&dir)
        .arg("watch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--interval"))
        .stdout(predicate::str::contains("--rounds"));
}

#[test]
fn test_zero_stories_rejected() {
    let dir = TempDir::new().unwrap();

    quiet_hn_cmd(&dir)
        .arg("top")
        .arg("--num-stories")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("number of stories must be positive"));
}

#[test]
fn test_zero_concurrency_rejected() {
    let dir = TempDir::new().unwrap();

    quiet_hn_cmd(&dir)
        .arg("top")
        .arg("--concurrency")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("concurrency must be positive"));
}

#[test]
fn test_invalid_env_value_rejected() {
    let dir = TempDir::new().unwrap();

    quiet_hn_cmd(&dir)
        .arg("top")
        .env("QUIET_HN_CACHE_TTL_SECS", "soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUIET_HN_CACHE_TTL_SECS"));
}

#[test]
fn test_env_file_in_working_directory_is_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "QUIET_HN_NUM_STORIES=0\n").unwrap();

    quiet_hn_cmd(&dir)
        .arg("top")
        .assert()
        .failure()
        .stderr(predicate::str::contains("number of stories must be positive"));
}

#[test]
fn test_flag_overrides_invalid_env_file_value() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "QUIET_HN_NUM_STORIES=0\n").unwrap();

    // Gets past configuration and fails at the network instead
    quiet_hn_cmd(&dir)
        .arg("top")
        .arg("-n")
        .arg("5")
        .arg("--api-url")
        .arg(UNREACHABLE_API)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load top stories"))
        .stderr(predicate::str::contains("number of stories must be positive").not());
}

#[test]
fn test_top_reports_listing_failure() {
    let dir = TempDir::new().unwrap();

    quiet_hn_cmd(&dir)
        .arg("top")
        .arg("--api-url")
        .arg(UNREACHABLE_API)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load top stories"));
}

#[test]
fn test_watch_keeps_going_after_listing_failure() {
    let dir = TempDir::new().unwrap();

    quiet_hn_cmd(&dir)
        .arg("watch")
        .arg("--api-url")
        .arg(UNREACHABLE_API)
        .arg("--interval")
        .arg("0")
        .arg("--rounds")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Request 1:"))
        .stdout(predicate::str::contains("Request 2:"))
        .stdout(predicate::str::contains("FAILED: Failed to load top stories"));
}
