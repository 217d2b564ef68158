#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn notemod() -> Command {
    Command::cargo_bin("notemod").unwrap()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

const HABLAR: &str = r#"[
    {"pronoun": "yo", "paradigm": "presentIndicative", "word": "hablo"},
    {"pronoun": "tú", "paradigm": "presentIndicative", "word": "hablas"},
    {"pronoun": "yo", "paradigm": "preteritIndicative", "word": "hablé"},
    {"pronoun": "yo", "paradigm": "imperfectIndicative", "word": "hablaba", "isIrregular": true}
]"#;

fn write_table(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("hablar.json");
    std::fs::write(&path, HABLAR).unwrap();
    path
}

fn write_rules(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("rules.yaml");
    std::fs::write(
        &path,
        "rules:\n  - field: PreteriteYo\n    pronoun: yo\n    paradigm: preteritIndicative\n    probability: 0.0\n  - field: PreteriteTu\n    pronoun: tú\n    paradigm: preteritIndicative\n",
    )
    .unwrap();
    path
}

// ---------------------------------------------------------------------------
// notemod conjugate
// ---------------------------------------------------------------------------

#[test]
fn conjugate_skip_policy_sets_matched_word() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir);
    let rules = write_rules(&dir);

    let output = notemod()
        .args(["conjugate", "hablar", "[]", "--policy", "skip"])
        .arg("--table")
        .arg(&table)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([{"set_field_if_not_empty": {"PreteriteYo": "hablé"}}])
    );
}

#[test]
fn conjugate_skip_tag_suppresses_field() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir);
    let rules = write_rules(&dir);

    let output = notemod()
        .args(["conjugate", "hablar", r#"["conjugation_skip:PreteriteYo"]"#, "--policy", "skip"])
        .arg("--table")
        .arg(&table)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn conjugate_done_policy_zero_probability_only_tags() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir);
    let rules = write_rules(&dir);

    let output = notemod()
        .args(["conjugate", "hablar", "[]", "--seed", "1"])
        .arg("--table")
        .arg(&table)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([{"add_tag": "conjugation_done:PreteriteYo"}])
    );
}

#[test]
fn conjugate_reports_suppressed_fields_on_stderr() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir);
    let rules = write_rules(&dir);

    notemod()
        .args(["conjugate", "hablar", "[]", "--seed", "1"])
        .arg("--table")
        .arg(&table)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success()
        .stderr(predicate::str::contains("regular conjugation card not generated"));

    notemod()
        .args(["conjugate", "hablar", r#"["conjugation_skip:PreteriteYo"]"#, "--policy", "skip"])
        .arg("--table")
        .arg(&table)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success()
        .stderr(predicate::str::contains("conjugation is skipped via tag"));
}

#[test]
fn conjugate_builtin_rules_surface_irregular_forms() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir);

    let output = notemod()
        .args(["conjugate", "hablar", "[]", "--seed", "3"])
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(output.status.success());
    let commands = stdout_json(&output);
    let commands = commands.as_array().unwrap();
    assert!(commands.contains(&json!({"add_tag": "conjugation_done:ImperfectYo"})));
    assert!(commands.contains(&json!({"set_field_if_not_empty": {"ImperfectYo": "hablaba"}})));
    assert!(commands.contains(&json!({"add_tag": "conjugation_done:IndicativePresentTu"})));
}

#[test]
fn conjugate_done_policy_rerun_is_empty() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir);

    let output = notemod()
        .args(["conjugate", "hablar", "[]"])
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(output.status.success());
    let tags: Vec<String> = stdout_json(&output)
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c.get("add_tag").and_then(Value::as_str).map(str::to_string))
        .collect();
    assert!(!tags.is_empty());

    let output = notemod()
        .args(["conjugate", "hablar", &serde_json::to_string(&tags).unwrap()])
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn conjugate_invalid_tags_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir);

    notemod()
        .args(["conjugate", "hablar", "not-json"])
        .arg("--table")
        .arg(&table)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid note tags"));
}

#[test]
fn conjugate_missing_arguments_fails() {
    notemod().args(["conjugate", "hablar"]).assert().failure();
}

#[test]
fn conjugate_missing_conjugator_fails() {
    notemod()
        .args(["conjugate", "hablar", "[]", "--conjugator", "notemod-no-such-conjugator"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not found"));
}

#[cfg(unix)]
fn fake_conjugator(dir: &TempDir, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("sd-conjugate");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn conjugate_runs_external_conjugator() {
    let dir = TempDir::new().unwrap();
    let table_path = write_table(&dir);
    let rules = write_rules(&dir);
    let script = fake_conjugator(&dir, &format!("cat '{}'", table_path.display()));

    let output = notemod()
        .args(["conjugate", "hablar", "[]", "--policy", "skip"])
        .arg("--conjugator")
        .arg(&script)
        .arg("--rules")
        .arg(&rules)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([{"set_field_if_not_empty": {"PreteriteYo": "hablé"}}])
    );
}

#[cfg(unix)]
#[test]
fn conjugate_external_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let script = fake_conjugator(&dir, "exit 2");

    notemod()
        .args(["conjugate", "hablar", "[]"])
        .arg("--conjugator")
        .arg(&script)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unexpected exit status"));
}

// ---------------------------------------------------------------------------
// notemod deduce-gender / set-fields / disable-skipped / resize-image
// ---------------------------------------------------------------------------

#[test]
fn deduce_gender_feminine() {
    let output = notemod().args(["deduce-gender", "die Frage"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!([{"set_field": {"Gender": "Femininum"}}]));
}

#[test]
fn deduce_gender_without_word_is_empty() {
    let output = notemod().arg("deduce-gender").output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn set_fields_pairs() {
    let output = notemod()
        .args(["set-fields", "Front", "hola", "Back", "-", "Dangling"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([{"set_field": {"Front": "hola"}}, {"set_field": {"Back": "-"}}])
    );
}

#[test]
fn disable_skipped_reads_stdin() {
    let output = notemod()
        .arg("disable-skipped")
        .write_stdin(r#"{"PreteriteYo": " - ", "PreteriteTu": "hablaste"}"#)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([
            {"add_tag": "conjugation_skip:PreteriteYo"},
            {"set_field": {"PreteriteYo": ""}}
        ])
    );
}

#[test]
fn disable_skipped_malformed_stdin_fails() {
    notemod()
        .arg("disable-skipped")
        .write_stdin("[1, 2]")
        .assert()
        .failure();
}

#[test]
fn resize_image_rewrites_tag() {
    let output = notemod()
        .args(["resize-image", "Picture", r#"<b>x</b><img src="oido.jpg">"#, "150", "resized"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([
            {"set_field": {"Picture": r#"<img src="oido.jpg" height="150">"#}},
            {"add_tag": "resized"}
        ])
    );
}

#[test]
fn resize_image_without_image_fails() {
    notemod()
        .args(["resize-image", "Picture", "plain text", "150", "resized"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected number of images"));
}

// ---------------------------------------------------------------------------
// notemod apply
// ---------------------------------------------------------------------------

#[test]
fn apply_updates_note() {
    let dir = TempDir::new().unwrap();
    let note = dir.path().join("note.json");
    std::fs::write(
        &note,
        r#"{"fields": {"PreteriteYo": "", "PreteriteTu": "mine"}, "tags": ["verb"]}"#,
    )
    .unwrap();

    let output = notemod()
        .arg("apply")
        .arg(&note)
        .write_stdin(
            r#"[
                {"set_field_if_not_empty": {"PreteriteYo": "hablé"}},
                {"set_field_if_not_empty": {"PreteriteTu": "hablaste"}},
                {"add_tag": "conjugation_done:PreteriteYo"}
            ]"#,
        )
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!({
            "fields": {"PreteriteYo": "hablé", "PreteriteTu": "mine"},
            "tags": ["conjugation_done:PreteriteYo", "verb"]
        })
    );
}

#[test]
fn apply_rejects_ambiguous_command() {
    let dir = TempDir::new().unwrap();
    let note = dir.path().join("note.json");
    std::fs::write(&note, r#"{"fields": {}, "tags": []}"#).unwrap();

    notemod()
        .arg("apply")
        .arg(&note)
        .write_stdin(r#"[{"add_tag": "a", "set_field": {"A": "1"}}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("top-level keys"));
}
