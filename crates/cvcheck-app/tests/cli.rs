use std::time::{Duration, Instant};

use assert_cmd::Command;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use tempfile::TempDir;

const RESULT_BODY: &str = r#"{
    "overall_score": 8.5,
    "strengths": ["Clear structure"],
    "weak_points": ["Few metrics"],
    "missing_keywords": ["Kubernetes"],
    "suggestions": ["Quantify impact"]
}"#;

/// `cvcheck` isolated from the user's config and preferences
fn cvcheck(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cvcheck").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("CVCHECK_DATA_DIR", home.path().join("data"))
        .env("CVCHECK_API_URL", "http://127.0.0.1:9")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("COLORFGBG");
    cmd
}

#[test]
fn rejects_unsupported_file() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("notes.txt");
    std::fs::write(&file, "plain text").unwrap();

    cvcheck(&home)
        .args(["--no-input", "upload"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please upload a PDF or DOCX file"));
}

#[test]
fn unknown_route_shows_landing() {
    let home = TempDir::new().unwrap();

    cvcheck(&home)
        .args(["open", "/unknown", "--no-input"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Get instant feedback on your CV"));
}

#[test]
fn theme_is_saved() {
    let home = TempDir::new().unwrap();

    cvcheck(&home)
        .args(["--no-input", "theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));

    let store = std::fs::read_to_string(home.path().join("data").join("local_storage.json")).unwrap();
    assert!(store.contains("dark"));

    // The next run starts dark and toggles to light
    cvcheck(&home)
        .args(["--no-input", "theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light"));
}

#[test]
fn language_lists_choices() {
    let home = TempDir::new().unwrap();

    cvcheck(&home)
        .args(["--no-input", "language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("English"))
        .stdout(predicate::str::contains("Español"));
}

#[test]
fn prints_results_from_service() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/analysis/abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESULT_BODY)
        .create();

    cvcheck(&home)
        .args(["--no-input", "--api-url", &server.url(), "results", "abc123", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SMART CV CHECKER - ANALYSIS REPORT"))
        .stdout(predicate::str::contains("Overall Score: 8.5/10"))
        .stdout(predicate::str::contains("Kubernetes"));

    mock.assert();
}

#[test]
fn saves_pdf_report() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("reports");
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/analysis/abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESULT_BODY)
        .create();

    cvcheck(&home)
        .args(["--no-input", "--api-url", &server.url(), "results", "abc123", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let saved: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn missing_results_exit_with_failure() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/analysis/nope")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Analysis not found"}"#)
        .create();

    cvcheck(&home)
        .args(["--no-input", "--api-url", &server.url(), "results", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Analysis not found"));
}

#[cfg(unix)]
#[test]
fn interrupt_while_polling_exits() {
    use std::process::Stdio;

    let home = TempDir::new().unwrap();
    let file = home.path().join("cv.pdf");
    std::fs::write(&file, b"%PDF-1.4 cv").unwrap();

    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/analyze")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"analysis_id": "abc123"}"#)
        .create();
    let status = server
        .mock("GET", "/api/analysis/abc123/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"progress": 40, "step": 2, "status": "analyzing"}"#)
        .expect_at_least(1)
        .create();

    // stdin stays open for the whole run
    let mut child = std::process::Command::cargo_bin("cvcheck")
        .unwrap()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("CVCHECK_DATA_DIR", home.path().join("data"))
        .env("CVCHECK_POLL_INTERVAL_MS", "50")
        .env("NO_COLOR", "1")
        .args(["--api-url", &server.url(), "upload"])
        .arg(&file)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while !status.matched() {
        assert!(Instant::now() < deadline, "never started polling");
        std::thread::sleep(Duration::from_millis(20));
    }

    let killed = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    let exit = loop {
        if let Some(exit) = child.try_wait().unwrap() {
            break exit;
        }
        if Instant::now() > deadline {
            child.kill().unwrap();
            panic!("still running after SIGINT");
        }
        std::thread::sleep(Duration::from_millis(20));
    };
    assert_eq!(exit.code(), Some(130));
}
