//! Integration tests for the `pdf2timetable` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut c = Command::cargo_bin("pdf2timetable").unwrap();
    c.env_remove("PDFIUM_LIB_PATH").env_remove("RUST_LOG");
    c
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn no_args_prints_usage_and_fails() {
    cmd().assert().failure();
}

#[test]
fn generate_prints_json_to_stdout() {
    let faculty = common::write_temp(&common::faculty_pdf(), ".pdf");
    let form_b = common::write_temp(&common::form_b_pdf(), ".pdf");

    let out = cmd()
        .args(["generate", "--no-progress", "-q"])
        .arg(faculty.path())
        .arg(form_b.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&out).expect("stdout should be JSON");
    assert_eq!(json["timetable"]["Monday"]["07:00-09:00"][0]["course_code"], "CS101");
    assert_eq!(json["filtered_courses"].as_array().unwrap().len(), 4);
}

#[test]
fn generate_missing_file_fails() {
    let form_b = common::write_temp(&common::form_b_pdf(), ".pdf");

    cmd()
        .args(["generate", "--no-progress", "/nonexistent/faculty.pdf"])
        .arg(form_b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn generate_rejects_non_pdf_extension() {
    let faculty = common::write_temp(&common::faculty_pdf(), ".txt");
    let form_b = common::write_temp(&common::form_b_pdf(), ".pdf");

    cmd()
        .args(["generate", "--no-progress"])
        .arg(faculty.path())
        .arg(form_b.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(".pdf extension"));
}

#[test]
fn generate_writes_html_file() {
    let faculty = common::write_temp(&common::faculty_pdf(), ".pdf");
    let form_b = common::write_temp(&common::form_b_pdf(), ".pdf");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("timetable.html");

    cmd()
        .args(["generate", "--no-progress", "--title", "Jane & John"])
        .arg(faculty.path())
        .arg(form_b.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<h1>Jane &amp; John</h1>"));
    assert!(html.contains("CS102"));
}

#[test]
fn generate_writes_json_file() {
    let faculty = common::write_temp(&common::faculty_pdf(), ".pdf");
    let form_b = common::write_temp(&common::form_b_pdf(), ".pdf");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("timetable.json");

    cmd()
        .args(["generate", "--no-progress", "-q"])
        .arg(faculty.path())
        .arg(form_b.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert!(json["student_courses"].is_array());
}

#[test]
fn render_html_from_bare_grid() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("grid.json");
    std::fs::write(
        &input,
        r#"{"Friday": {"15:00-17:00": [
            {"course_code": "CS201", "course_title": "Algorithms", "hall": "LT9"}
        ]}}"#,
    )
    .unwrap();
    let out = dir.path().join("grid.html");

    cmd()
        .arg("render")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<div class=\"course-code\">CS201</div>"));
    assert!(html.contains("<th>Saturday</th>"));
}

#[test]
fn render_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    std::fs::write(&input, r#"{"Funday": {}}"#).unwrap();

    cmd()
        .arg("render")
        .arg(&input)
        .args(["-o", "unused.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a timetable payload"));
}

#[test]
fn render_rejects_json_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("grid.json");
    std::fs::write(&input, "{}").unwrap();

    cmd()
        .arg("render")
        .arg(&input)
        .args(["-o", "out.json"])
        .assert()
        .failure();
}
