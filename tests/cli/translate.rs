use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const PAGE: &str = r#"[
    {"kind": "start", "tag": "h1", "pos": {"line": 1}},
    {"kind": "text", "text": "Welcome", "pos": {"line": 1}},
    {"kind": "end", "tag": "h1", "pos": {"line": 1}},
    {"kind": "sub", "pos": {"line": 2},
     "directives": [{"name": "i18n:msg", "value": ""}],
     "stream": [
        {"kind": "start", "tag": "p", "pos": {"line": 2}},
        {"kind": "text", "text": "Read the ", "pos": {"line": 2}},
        {"kind": "start", "tag": "a", "attrs": [["href", "/faq"]], "pos": {"line": 2}},
        {"kind": "text", "text": "FAQ", "pos": {"line": 2}},
        {"kind": "end", "tag": "a", "pos": {"line": 2}},
        {"kind": "text", "text": " first.", "pos": {"line": 2}},
        {"kind": "end", "tag": "p", "pos": {"line": 2}}
     ]}
]"#;

const CATALOG: &str = r#"{
    "messages": {
        "Welcome": "Willkommen",
        "Read the [1:FAQ] first.": "Lies zuerst die [1:FAQ]."
    }
}"#;

fn texts(events: &Value) -> Vec<String> {
    events
        .as_array()
        .expect("array of events")
        .iter()
        .filter(|event| event["kind"] == "text")
        .map(|event| event["text"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_translate_with_catalog() -> Result<()> {
    let test = CliTest::with_file("page.stream.json", PAGE)?;
    test.write_file("de.json", CATALOG)?;

    let output = test
        .translate_command("page.stream.json")
        .args(["--catalog", "de.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let events: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(texts(&events), vec!["Willkommen", "Lies zuerst die ", "FAQ", "."]);
    // The msg region is expanded in place; no sub events remain.
    assert!(
        events
            .as_array()
            .expect("array of events")
            .iter()
            .all(|event| event["kind"] != "sub")
    );

    Ok(())
}

#[test]
fn test_translate_without_catalog_keeps_text() -> Result<()> {
    let test = CliTest::with_file("page.stream.json", PAGE)?;

    let output = test.translate_command("page.stream.json").output()?;
    assert!(output.status.success());

    let events: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(texts(&events), vec!["Welcome", "Read the ", "FAQ", " first."]);

    Ok(())
}

#[test]
fn test_translate_reports_bad_translation() -> Result<()> {
    let test = CliTest::with_file("page.stream.json", PAGE)?;
    test.write_file(
        "de.json",
        r#"{ "messages": { "Read the [1:FAQ] first.": "Lies die [2:FAQ]." } }"#,
    )?;

    let output = test
        .translate_command("page.stream.json")
        .args(["--catalog", "de.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());

    let err = stderr(&output);
    assert!(err.contains("unknown placeholder block 2"));
    assert!(err.contains("--> page.stream.json"));

    Ok(())
}

#[test]
fn test_translate_missing_catalog_is_an_error() -> Result<()> {
    let test = CliTest::with_file("page.stream.json", PAGE)?;

    let output = test
        .translate_command("page.stream.json")
        .args(["--catalog", "missing.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read catalog file"));

    Ok(())
}
