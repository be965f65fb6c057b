//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn formgrade() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("formgrade").unwrap();
    cmd.env_remove("FORMGRADE_STORE_DIR").env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

/// A temp directory with `formgrade init` already run in it.
fn initialized_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    formgrade().current_dir(dir.path()).arg("init").assert().success();
    dir
}

// --- score ---

#[test]
fn score_partial_answers() {
    formgrade()
        .args(["score", "--form", "../../forms/reading-quiz.json"])
        .args(["--answers", "../../answers/reading-quiz-partial.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form: Reading Quiz"))
        .stdout(predicate::str::contains("Score: 10/11 (91%)"));
}

#[test]
fn score_perfect_answers_as_json() {
    let output = formgrade()
        .args(["score", "--form", "../../forms/reading-quiz.json"])
        .args(["--answers", "../../answers/reading-quiz-perfect.json"])
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output.stdout);
    assert_eq!(json["score"], 11);
    assert_eq!(json["maxScore"], 11);
}

#[test]
fn score_explain_shows_each_question() {
    formgrade()
        .args(["score", "--form", "../../forms/reading-quiz.json"])
        .args(["--answers", "../../answers/reading-quiz-partial.json"])
        .arg("--explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("reading"))
        .stdout(predicate::str::contains("5/5"))
        .stdout(predicate::str::contains("fill-in"))
        .stdout(predicate::str::contains("3/3"))
        .stdout(predicate::str::contains("sorting"))
        .stdout(predicate::str::contains("2/3"));
}

#[test]
fn score_explain_json_includes_breakdown() {
    let output = formgrade()
        .args(["score", "--form", "../../forms/geography.json"])
        .args(["--answers", "../../answers/geography.json"])
        .args(["--explain", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output.stdout);
    assert_eq!(json["result"]["score"], 2);
    assert_eq!(json["result"]["maxScore"], 3);
    assert_eq!(json["breakdown"]["questions"].as_array().unwrap().len(), 2);
    assert_eq!(json["breakdown"]["skipped"][0]["question_id"], "essay");
    assert_eq!(json["breakdown"]["skipped"][0]["reason"], "unsupported_type");
}

#[test]
fn score_skips_unsupported_questions() {
    formgrade()
        .args(["score", "--form", "../../forms/geography.json"])
        .args(["--answers", "../../answers/geography.json"])
        .arg("--explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2/3 (67%)"))
        .stdout(predicate::str::contains("Skipped [essay] (essay)"));
}

#[test]
fn score_non_list_answers_as_unanswered() {
    formgrade()
        .args(["score", "--form", "../../forms/reading-quiz.json"])
        .args(["--answers", "../../answers/not-a-list.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/11 (0%)"));
}

#[test]
fn score_null_answers() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("null.json");
    std::fs::write(&answers, "null").unwrap();

    formgrade()
        .args(["score", "--form", "../../forms/reading-quiz.json"])
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/11 (0%)"));
}

#[test]
fn score_unknown_format_fails() {
    formgrade()
        .args(["score", "--form", "../../forms/reading-quiz.json"])
        .args(["--answers", "../../answers/reading-quiz-partial.json"])
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: xml"));
}

#[test]
fn score_missing_form_file() {
    formgrade()
        .args(["score", "--form", "nonexistent.json"])
        .args(["--answers", "../../answers/reading-quiz-partial.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("failed to read form file"));
}

#[test]
fn score_unparseable_answers_file() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("broken.json");
    std::fs::write(&answers, "[{").unwrap();

    formgrade()
        .args(["score", "--form", "../../forms/reading-quiz.json"])
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse answers JSON"));
}

// --- validate ---

#[test]
fn validate_valid_form() {
    formgrade()
        .args(["validate", "--form", "../../forms/reading-quiz.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form: Reading Quiz (3 questions)"))
        .stdout(predicate::str::contains("All forms valid."));
}

#[test]
fn validate_reports_warnings() {
    formgrade()
        .args(["validate", "--form", "../../forms/geography.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[essay] WARNING: unsupported question type 'essay' will not be scored",
        ))
        .stdout(predicate::str::contains("item 'Nile' has no correct category"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_directory() {
    formgrade()
        .args(["validate", "--form", "../../forms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Geography Mix"))
        .stdout(predicate::str::contains("Reading Quiz"));
}

#[test]
fn validate_nonexistent_file() {
    formgrade()
        .args(["validate", "--form", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// --- init ---

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    formgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created formgrade.toml"))
        .stdout(predicate::str::contains("Created formgrade-data/forms/example.json"))
        .stdout(predicate::str::contains("Created example-answers.json"));

    assert!(dir.path().join("formgrade.toml").exists());
    assert!(dir.path().join("formgrade-data/forms/example.json").exists());
    assert!(dir.path().join("example-answers.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = initialized_dir();

    formgrade()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("formgrade.toml already exists, skipping."));
}

#[test]
fn init_example_is_valid_and_scores() {
    let dir = initialized_dir();

    formgrade()
        .current_dir(dir.path())
        .args(["validate", "--form", "formgrade-data/forms/example.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All forms valid."));

    formgrade()
        .current_dir(dir.path())
        .args(["score", "--form", "formgrade-data/forms/example.json"])
        .args(["--answers", "example-answers.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 10/11 (91%)"));
}

// --- submit / responses / publish ---

#[test]
fn submit_then_list_responses() {
    let dir = initialized_dir();

    formgrade()
        .current_dir(dir.path())
        .args(["submit", "--form-id", "example", "--answers", "example-answers.json"])
        .args(["--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved"))
        .stdout(predicate::str::contains("Score: 10/11 (91%)"));

    formgrade()
        .current_dir(dir.path())
        .args(["submit", "--form-id", "example", "--answers", "example-answers.json"])
        .assert()
        .success();

    formgrade()
        .current_dir(dir.path())
        .args(["responses", "--form-id", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("Anonymous"))
        .stdout(predicate::str::contains("2 response(s): 1 signed in, 1 anonymous"));
}

#[test]
fn submit_json_returns_stored_response() {
    let dir = initialized_dir();

    let output = formgrade()
        .current_dir(dir.path())
        .args(["submit", "--form-id", "example", "--answers", "example-answers.json"])
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let response = stdout_json(&output.stdout);
    assert_eq!(response["formId"], "example");
    assert_eq!(response["score"], 10);
    assert_eq!(response["maxScore"], 11);
    assert_eq!(response["answers"].as_array().unwrap().len(), 3);
    assert!(response.get("userId").is_none());

    let id = response["id"].as_str().unwrap();
    assert!(dir
        .path()
        .join(format!("formgrade-data/responses/example/{id}.json"))
        .exists());
}

#[test]
fn submit_to_unknown_form_still_records() {
    let dir = initialized_dir();

    formgrade()
        .current_dir(dir.path())
        .args(["submit", "--form-id", "ghost", "--answers", "example-answers.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/0 (0%)"));

    let output = formgrade()
        .current_dir(dir.path())
        .args(["responses", "--form-id", "ghost", "--format", "json"])
        .output()
        .unwrap();
    let json = stdout_json(&output.stdout);
    assert_eq!(json["summary"]["count"], 1);
}

#[test]
fn responses_for_empty_form() {
    let dir = initialized_dir();

    formgrade()
        .current_dir(dir.path())
        .args(["responses", "--form-id", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No responses for 'example'."));
}

#[test]
fn publish_and_unpublish() {
    let dir = initialized_dir();

    formgrade()
        .current_dir(dir.path())
        .args(["publish", "--form-id", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published 'Example Quiz' (share id: "));

    let stored = std::fs::read_to_string(dir.path().join("formgrade-data/forms/example.json")).unwrap();
    let form: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(form["isPublished"], true);

    formgrade()
        .current_dir(dir.path())
        .args(["publish", "--form-id", "example", "--unpublish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unpublished 'Example Quiz'"));
}

#[test]
fn publish_unknown_form_fails() {
    let dir = initialized_dir();

    formgrade()
        .current_dir(dir.path())
        .args(["publish", "--form-id", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("form not found: ghost"));
}

#[test]
fn explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("elsewhere");
    std::fs::create_dir_all(store.join("forms")).unwrap();
    std::fs::copy("../../forms/reading-quiz.json", store.join("forms/reading-quiz.json")).unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, format!("store_dir = {:?}\n", store.display().to_string())).unwrap();

    formgrade()
        .args(["submit", "--form-id", "reading-quiz"])
        .args(["--answers", "../../answers/reading-quiz-perfect.json"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 11/11 (100%)"));

    assert_eq!(
        std::fs::read_dir(store.join("responses/reading-quiz")).unwrap().count(),
        1
    );
}

#[test]
fn missing_config_path_fails() {
    formgrade()
        .args(["responses", "--form-id", "example", "--config", "no-such.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
