use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, run};

const EN: &str = r#"{
  "common": {
    "save": "Save"
  }
}
"#;

const FR: &str = r#"{
  "common": {
    "save": "Enregistrer"
  }
}
"#;

fn project() -> Result<CliTest> {
    CliTest::with_locales(&[("en", EN), ("fr", FR)])
}

#[test]
fn test_add_dry_run_by_default() -> Result<()> {
    let test = project()?;
    test.write_file(
        "entries.json",
        r#"{"common.edit": {"en": "Edit", "fr": "Modifier"}}"#,
    )?;

    let result = run(test.add_command().arg("entries.json"))?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains(r#"+ common.edit = "Edit""#));
    assert!(result.stdout.contains(r#"+ common.edit = "Modifier""#));
    assert!(result.stdout.contains("Would add 2 change(s) in 2 file(s)."));
    assert!(result.stdout.contains("Run with --apply to write these changes."));
    assert_eq!(test.read_file("messages/en.json")?, EN);
    assert_eq!(test.read_file("messages/fr.json")?, FR);

    Ok(())
}

#[test]
fn test_add_apply_writes_nested_keys() -> Result<()> {
    let test = project()?;
    test.write_file(
        "entries.json",
        r#"{"common.edit": {"en": "Edit", "fr": "Modifier"}, "crm.leads.columns.status": {"en": "Status"}}"#,
    )?;

    let result = run(test.add_command().arg("entries.json").arg("--apply"))?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Added 3 change(s) in 2 file(s)."));
    let en = test.read_file("messages/en.json")?;
    insta::assert_snapshot!(en.trim_end(), @r#"
    {
      "common": {
        "save": "Save",
        "edit": "Edit"
      },
      "crm": {
        "leads": {
          "columns": {
            "status": "Status"
          }
        }
      }
    }
    "#);
    assert_eq!(
        test.read_locale("fr")?,
        json!({"common": {"save": "Enregistrer", "edit": "Modifier"}})
    );

    Ok(())
}

#[test]
fn test_add_keeps_existing_values() -> Result<()> {
    let test = project()?;
    test.write_file("entries.json", r#"{"common.save": {"en": "Store"}}"#)?;

    let result = run(test.add_command().arg("entries.json").arg("--apply"))?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("Kept 1 existing key(s) unchanged."));
    assert!(result.stdout.contains("Nothing to change."));
    assert_eq!(test.read_file("messages/en.json")?, EN);

    Ok(())
}

#[test]
fn test_add_is_idempotent() -> Result<()> {
    let test = project()?;
    test.write_file("entries.json", r#"{"common.edit": {"en": "Edit"}}"#)?;

    run(test.add_command().arg("entries.json").arg("--apply"))?;
    let first = test.read_file("messages/en.json")?;
    let result = run(test.add_command().arg("entries.json").arg("--apply"))?;

    assert_eq!(result.code, Some(0));
    assert_eq!(test.read_file("messages/en.json")?, first);

    Ok(())
}

#[test]
fn test_add_writes_non_ascii_unescaped() -> Result<()> {
    let test = CliTest::with_locales(&[("he", "{}")])?;
    test.write_file("entries.json", r#"{"common.edit": {"he": "ערוך"}}"#)?;

    let result = run(test.add_command().arg("entries.json").arg("--apply"))?;

    assert_eq!(result.code, Some(0));
    let content = test.read_file("messages/he.json")?;
    assert!(content.contains("ערוך"));
    assert!(!content.contains("\\u"));

    Ok(())
}

#[test]
fn test_add_reports_structural_conflict() -> Result<()> {
    let test = CliTest::with_locales(&[("en", r#"{"title": "Home"}"#)])?;
    test.write_file(
        "entries.json",
        r#"{"title.sub": {"en": "Sub"}, "footer": {"en": "Footer"}}"#,
    )?;

    let result = run(test.add_command().arg("entries.json").arg("--apply"))?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("'title' is already a value"));
    assert!(
        result
            .stdout
            .contains("1 key(s) skipped because a parent key holds a value.")
    );
    assert_eq!(
        test.read_locale("en")?,
        json!({"title": "Home", "footer": "Footer"})
    );

    Ok(())
}

#[test]
fn test_add_strict_writes_nothing_on_conflict() -> Result<()> {
    let test = CliTest::with_locales(&[("en", r#"{"title": "Home"}"#)])?;
    test.write_file(
        "entries.json",
        r#"{"title.sub": {"en": "Sub"}, "footer": {"en": "Footer"}}"#,
    )?;

    let result = run(test
        .add_command()
        .arg("entries.json")
        .arg("--apply")
        .arg("--strict"))?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("No files were written."));
    assert_eq!(test.read_locale("en")?, json!({"title": "Home"}));

    Ok(())
}

#[test]
fn test_add_locale_filter() -> Result<()> {
    let test = project()?;
    test.write_file(
        "entries.json",
        r#"{"common.edit": {"en": "Edit", "fr": "Modifier"}}"#,
    )?;

    let result = run(test
        .add_command()
        .arg("entries.json")
        .args(["--locale", "fr", "--apply"]))?;

    assert_eq!(result.code, Some(0));
    assert_eq!(test.read_file("messages/en.json")?, EN);
    assert_eq!(test.read_locale("fr")?["common"]["edit"], "Modifier");

    Ok(())
}

#[test]
fn test_add_missing_entries_file() -> Result<()> {
    let test = project()?;

    let result = run(test.add_command().arg("missing.json"))?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("Failed to read entries file"));

    Ok(())
}

#[test]
fn test_add_invalid_key_in_entries() -> Result<()> {
    let test = project()?;
    test.write_file("entries.json", r#"{"common..edit": {"en": "Edit"}}"#)?;

    let result = run(test.add_command().arg("entries.json"))?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("consecutive dots"));

    Ok(())
}

#[test]
fn test_add_without_locale_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("entries.json", r#"{"a": {"en": "A"}}"#)?;

    let result = run(test.add_command().arg("entries.json"))?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("No locale files found"));

    Ok(())
}
