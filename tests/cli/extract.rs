use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const INDEX: &str = r#"[
    {"kind": "start", "tag": "h1", "pos": {"line": 2}},
    {"kind": "text", "text": "Welcome", "pos": {"line": 2}},
    {"kind": "end", "tag": "h1", "pos": {"line": 2}},
    {"kind": "start", "tag": "img", "attrs": [["src", "logo.png"], ["alt", "Company logo"]],
     "pos": {"line": 3}},
    {"kind": "end", "tag": "img", "pos": {"line": 3}},
    {"kind": "expr", "code": "ngettext('%d item', '%d items', n)", "pos": {"line": 5}},
    {"kind": "sub", "pos": {"line": 7},
     "directives": [{"name": "i18n:comment", "value": "Shown under the form"},
                    {"name": "i18n:msg", "value": "name"}],
     "stream": [
        {"kind": "start", "tag": "p", "pos": {"line": 7}},
        {"kind": "text", "text": "Hello ", "pos": {"line": 7}},
        {"kind": "expr", "code": "user.name", "pos": {"line": 7}},
        {"kind": "text", "text": ", see ", "pos": {"line": 7}},
        {"kind": "start", "tag": "a", "attrs": [["href", "/help"]], "pos": {"line": 7}},
        {"kind": "text", "text": "help", "pos": {"line": 7}},
        {"kind": "end", "tag": "a", "pos": {"line": 7}},
        {"kind": "end", "tag": "p", "pos": {"line": 7}}
     ]},
    {"kind": "start", "tag": "script", "pos": {"line": 9}},
    {"kind": "text", "text": "var skipped = 1;", "pos": {"line": 9}},
    {"kind": "end", "tag": "script", "pos": {"line": 9}}
]"#;

#[test]
fn test_extract_text_report() -> Result<()> {
    let test = CliTest::with_file("templates/index.stream.json", INDEX)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5, "{}", out);
    assert!(lines[0].starts_with("./templates/index.stream.json:2  -"));
    assert!(lines[0].ends_with("Welcome"));
    assert!(lines[1].ends_with("Company logo"));
    assert!(lines[2].contains("ngettext  (%d item | %d items | <dynamic>)"));
    assert!(lines[3].contains("Hello %(name)s, see [1:help]  # Shown under the form"));
    assert_eq!(lines[4], "✓ Extracted 4 messages from 1 stream file");
    assert!(!out.contains("skipped"));

    Ok(())
}

#[test]
fn test_extract_json() -> Result<()> {
    let test = CliTest::with_file("templates/index.stream.json", INDEX)?;

    let output = test.extract_command().args(["--format", "json"]).output()?;
    assert!(output.status.success());

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    let messages = parsed.as_array().expect("array of messages");
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["file"], "./templates/index.stream.json");
    assert_eq!(messages[0]["line"], 2);
    assert_eq!(messages[2]["function"], "ngettext");
    assert_eq!(messages[3]["comments"][0], "Shown under the form");

    Ok(())
}

#[test]
fn test_extract_no_text() -> Result<()> {
    let test = CliTest::with_file("templates/index.stream.json", INDEX)?;

    let output = test
        .extract_command()
        .args(["--no-text", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    let functions: Vec<&Value> = parsed
        .as_array()
        .expect("array of messages")
        .iter()
        .map(|message| &message["function"])
        .collect();
    // The msg region still counts; only plain text and attributes are dropped.
    assert_eq!(functions, vec![&Value::from("ngettext"), &Value::Null]);

    Ok(())
}

#[test]
fn test_extract_respects_config() -> Result<()> {
    let test = CliTest::with_file("templates/index.stream.json", INDEX)?;
    test.write_file(
        ".glossarc.json",
        r#"{ "includeAttrs": [], "gettextFunctions": ["_"], "ignores": ["**/vendor/**"] }"#,
    )?;
    test.write_file(
        "vendor/lib.stream.json",
        r#"[{"kind": "text", "text": "Vendored", "pos": {"line": 1}}]"#,
    )?;

    let output = test.extract_command().output()?;
    let out = stdout(&output);
    assert!(output.status.success());
    assert!(!out.contains("Company logo"));
    assert!(!out.contains("ngettext"));
    assert!(!out.contains("Vendored"));
    assert!(out.contains("Extracted 2 messages from 1 stream file"));

    Ok(())
}

#[test]
fn test_extract_reports_broken_files() -> Result<()> {
    let test = CliTest::with_file("templates/index.stream.json", INDEX)?;
    test.write_file("templates/broken.stream.json", "[{\"kind\": \"start\"")?;
    test.write_file(
        "templates/params.stream.json",
        r#"[{"kind": "sub", "pos": {"line": 4},
             "directives": [{"name": "i18n:msg", "value": ""}],
             "stream": [
                {"kind": "start", "tag": "p", "pos": {"line": 4}},
                {"kind": "expr", "code": "count", "pos": {"line": 4}},
                {"kind": "end", "tag": "p", "pos": {"line": 4}}
             ]}]"#,
    )?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("Welcome"));
    assert!(out.contains("parse-error"));
    assert!(out.contains("--> ./templates/broken.stream.json"));
    assert!(out.contains("--> ./templates/params.stream.json:4"));
    assert!(out.contains("✘ 2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".glossarc.json", r#"{ "ignores": ["[broken"] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_extract_unknown_option_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .extract_command()
        .args(["-o", "template_class=genshi"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown extractor option"));

    Ok(())
}
