use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_hdrdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_prints_record() {
    let input = std::fs::read_to_string(fixture_path("math.h")).unwrap();
    let assert = cmd().write_stdin(input).assert().success();

    assert_eq!(
        stdout_json(&assert),
        json!({
            "filename": "<stdin>",
            "path": "<stdin>",
            "brief": "",
            "description": "",
            "functions": [{
                "name": "add",
                "return_type": "int",
                "parameters": [
                    {"type": "int", "name": "a", "description": "first value"},
                    {"type": "int", "name": "b", "description": "second value"}
                ],
                "brief": "Adds two numbers",
                "description": "",
                "file": "<stdin>",
                "line": 5
            }],
            "data_types": []
        })
    );
}

#[test]
fn stdin_mode_markdown() {
    let input = std::fs::read_to_string(fixture_path("math.h")).unwrap();
    cmd()
        .args(["-f", "markdown"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# <stdin>\n"))
        .stdout(predicate::str::contains("* [add](#api-add)"))
        .stdout(predicate::str::contains("int add(int a, int b);"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "pdf"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- file mode --

#[test]
fn file_mode_prints_array() {
    let assert = cmd()
        .arg(fixture_path("button.h"))
        .arg(fixture_path("math.h"))
        .assert()
        .success();
    let json = stdout_json(&assert);
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["filename"], "button.h");
    assert_eq!(records[1]["filename"], "math.h");

    let button = &records[0];
    assert!(button["brief"]
        .as_str()
        .unwrap()
        .starts_with("Clickable buttons."));

    let functions: Vec<_> = button["functions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(functions, ["button_create", "button_destroy"]);

    let create = &button["functions"][0];
    assert_eq!(create["return_type"], "Button *");
    assert_eq!(create["line"], 39);
    assert_eq!(
        create["parameters"][2],
        json!({
            "type": "void (*on_click)(int button)",
            "name": "",
            "description": ""
        })
    );

    let types: Vec<_> = button["data_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| (t["name"].as_str().unwrap(), t["kind"].as_str().unwrap()))
        .collect();
    assert_eq!(types, [("Button", "struct"), ("ButtonStyle", "enum")]);

    let members = &button["data_types"][0]["members"];
    assert_eq!(members[0]["name"], "label");
    assert_eq!(members[0]["description"], "Caption text");
    assert_eq!(members[1]["name"], "pressed");
    assert_eq!(members[2]["type"], "void (*on_click)(int");
    assert_eq!(members[2]["name"], "button)");
    assert_eq!(button["data_types"][1]["members"], json!([]));
}

#[test]
fn include_private_flag() {
    let names = |assert: assert_cmd::assert::Assert| -> Vec<String> {
        stdout_json(&assert)[0]["functions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap().to_string())
            .collect()
    };

    let hidden = names(cmd().arg(fixture_path("button.h")).assert().success());
    assert!(!hidden.iter().any(|n| n == "_button_internal_reset"));

    let shown = names(
        cmd()
            .arg("--include-private")
            .arg(fixture_path("button.h"))
            .assert()
            .success(),
    );
    assert_eq!(shown[0], "_button_internal_reset");
}

#[test]
fn output_dir_gets_one_page_per_header() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-f", "markdown"])
        .arg(fixture_path("button.h"))
        .arg(fixture_path("math.h"))
        .assert()
        .success();

    let page = std::fs::read_to_string(dir.path().join("button.md")).unwrap();
    assert!(page.contains("<a id=\"api-button_create\"></a>"));
    assert!(page.contains("<a id=\"type-buttonstyle\"></a>"));
    assert!(page.contains("| pressed | `bool` | Whether the button is held down |"));
    assert!(dir.path().join("math.md").exists());
}

#[test]
fn directory_input_is_scanned_for_headers() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture_path("math.h"), dir.path().join("math.h")).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "int ignored(void);\n").unwrap();

    let assert = cmd().arg(dir.path()).assert().success();
    let json = stdout_json(&assert);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["filename"], "math.h");
}

#[test]
fn unreadable_file_skipped_run_continues() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("latin1.h");
    std::fs::write(&bad, [0x2f, 0x2a, 0x2a, 0xe9, 0x2a, 0x2f, 0x0a]).unwrap();

    let assert = cmd()
        .arg(&bad)
        .arg(fixture_path("math.h"))
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping unreadable header"));
    let json = stdout_json(&assert);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["filename"], "math.h");
}

#[test]
fn duplicate_filename_first_wins() {
    let dir = TempDir::new().unwrap();
    let (a, b) = (dir.path().join("a"), dir.path().join("b"));
    std::fs::create_dir_all(&a).unwrap();
    std::fs::create_dir_all(&b).unwrap();
    std::fs::copy(fixture_path("math.h"), a.join("api.h")).unwrap();
    std::fs::write(b.join("api.h"), "/** @brief Sub. */\nint sub(int a, int b);\n").unwrap();

    let assert = cmd()
        .arg(a.join("api.h"))
        .arg(b.join("api.h"))
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping duplicate file"));
    let json = stdout_json(&assert);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["functions"][0]["name"], "add");
}

#[test]
fn duplicate_filename_follows_command_line_order() {
    let dir = TempDir::new().unwrap();
    let (a, b) = (dir.path().join("a"), dir.path().join("b"));
    std::fs::create_dir_all(&a).unwrap();
    std::fs::create_dir_all(&b).unwrap();
    std::fs::copy(fixture_path("math.h"), a.join("api.h")).unwrap();
    std::fs::write(b.join("api.h"), "/** @brief Sub. */\nint sub(int a, int b);\n").unwrap();

    let assert = cmd()
        .arg(b.join("api.h"))
        .arg(a.join("api.h"))
        .assert()
        .success();
    let json = stdout_json(&assert);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["functions"][0]["name"], "sub");
}

#[test]
fn no_include_private_overrides_settings_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("hdrdoc.json"), r#"{"include_private": true}"#).unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("--no-include-private")
        .arg(fixture_path("button.h"))
        .assert()
        .success()
        .stdout(predicate::str::contains("_button_internal_reset").not());
}

// -- settings file --

#[test]
fn settings_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("hdrdoc.json"),
        r#"{"include_private": true, "format": "markdown"}"#,
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .arg(fixture_path("button.h"))
        .assert()
        .success()
        .stdout(predicate::str::contains("### _button_internal_reset"));
}

#[test]
fn malformed_settings_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.json");
    std::fs::write(&config, "{ nope").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid settings file"));
}
