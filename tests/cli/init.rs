use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .glossarc.json"));

    let content = test.read_file(".glossarc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for field in ["ignoreTags", "includeAttrs", "extractText", "gettextFunctions"] {
        assert!(parsed.get(field).is_some(), "Config should have '{}'", field);
    }
    assert_eq!(parsed["extractText"], Value::Bool(true));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".glossarc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".glossarc.json already exists"));
    assert_eq!(test.read_file(".glossarc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "templates/index.stream.json",
        r#"[{"kind": "text", "text": "Hello", "pos": {"line": 1}}]"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "extract should work with the initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.root().join(".glossarc.json").exists());

    Ok(())
}
