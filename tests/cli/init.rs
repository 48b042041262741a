use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let result = run(test.command().arg("init"))?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Created .locmergerc.json"));

    let content = test.read_file(".locmergerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["messagesRoot"], "./messages");
    assert_eq!(parsed["primaryLocale"], "en");
    assert_eq!(parsed["locales"], Value::Array(vec![]));
    assert_eq!(parsed["placeholderPrefix"], "[AUTO] ");
    assert!(content.ends_with("}\n"));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".locmergerc.json", "{}")?;

    let result = run(test.command().arg("init"))?;

    assert_eq!(result.code, Some(1));
    assert!(result.stderr.contains(".locmergerc.json already exists"));
    assert_eq!(test.read_file(".locmergerc.json")?, "{}");

    Ok(())
}
