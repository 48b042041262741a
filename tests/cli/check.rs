use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", r#"{"common": {"save": "Save", "edit": "Edit"}}"#),
        ("fr", r#"{"common": {"save": "Enregistrer", "edit": "Modifier"}}"#),
    ])?;

    let result = run(&mut test.check_command())?;

    assert_eq!(result.code, Some(0));
    assert!(
        result
            .stdout
            .contains("No issues found in 2 locale file(s) (2 keys in en).")
    );
    assert!(result.stdout.contains("  fr: 2 keys (100.0%)"));

    Ok(())
}

#[test]
fn test_check_reports_missing_and_extra_keys() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", r#"{"common": {"save": "Save", "edit": "Edit"}}"#),
        ("fr", r#"{"common": {"save": "Enregistrer", "legacy": "Ancien"}}"#),
    ])?;

    let result = run(&mut test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("Missing keys (1):"));
    assert!(result.stdout.contains("- common.edit"));
    assert!(result.stdout.contains("Extra keys (1):"));
    assert!(result.stdout.contains("- common.legacy"));
    assert!(result.stdout.contains("2 issue(s) found."));
    assert!(result.stdout.contains("Coverage:"));
    assert!(result.stdout.contains("  en: 2 keys (primary)"));
    assert!(result.stdout.contains("  fr: 2 keys (50.0%)"));

    Ok(())
}

#[test]
fn test_check_dotted_key_is_not_a_nested_key() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", r#"{"a": {"b": "B"}}"#),
        ("fr", r#"{"a.b": "B"}"#),
    ])?;

    let result = run(&mut test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("Missing keys (1):"));
    assert!(result.stdout.contains("Extra keys (1):"));
    assert!(result.stdout.contains("  fr: 1 keys (0.0%)"));

    Ok(())
}

#[test]
fn test_check_reports_empty_values() -> Result<()> {
    let test = CliTest::with_locales(&[("en", r#"{"title": "", "section": {}}"#)])?;

    let result = run(&mut test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("Empty values (2):"));
    assert!(result.stdout.contains("- title"));
    assert!(result.stdout.contains("- section"));

    Ok(())
}

#[test]
fn test_check_primary_locale_override() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", r#"{"a": "A"}"#),
        ("fr", r#"{"a": "A", "b": "B"}"#),
    ])?;

    let result = run(test.check_command().args(["--primary-locale", "fr"]))?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("Missing keys (1):"));
    assert!(result.stdout.contains("missing (present in fr)"));

    Ok(())
}

#[test]
fn test_check_custom_messages_root_from_config() -> Result<()> {
    let test = CliTest::with_file(".locmergerc.json", r#"{"messagesRoot": "./i18n"}"#)?;
    test.write_file("i18n/en.json", r#"{"a": "A"}"#)?;

    let result = run(&mut test.check_command())?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("No issues found in 1 locale file(s)"));

    Ok(())
}

#[test]
fn test_check_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".locmergerc.json", r#"{"primaryLocale": "../en"}"#)?;

    let result = run(&mut test.check_command())?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("Invalid 'primaryLocale'"));

    Ok(())
}
