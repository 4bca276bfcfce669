use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const CONFIG: &str = r#"{
  "projects": [
    { "name": "fr", "root": "src", "translationFile": "locale/messages.fr.xlf" }
  ]
}"#;

const XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2">
  <file source-language="en" datatype="plaintext">
    <body>
      <trans-unit id="title" datatype="html">
        <source>Title</source>
        <target>Titre</target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

fn workspace() -> Result<CliTest> {
    let test = CliTest::with_file(".i18nlensrc.json", CONFIG)?;
    test.write_file("locale/messages.fr.xlf", XLIFF)?;
    Ok(test)
}

#[test]
fn test_clean_workspace() -> Result<()> {
    let test = workspace()?;
    test.write_file("src/app.html", "<h1 i18n=\"@@title\">Title</h1>\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(0));
    assert_eq!(
        result.stdout,
        "\u{2713} Checked 1 markup file, 1 translation file - no issues found\n"
    );
    Ok(())
}

#[test]
fn test_missing_translation() -> Result<()> {
    let test = workspace()?;
    test.write_file(
        "src/app.html",
        "<h1 i18n=\"@@title\">Title</h1>\n<p i18n=\"@@intro\">Intro</p>\n",
    )?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("warning: \"intro\"  missing-translation"));
    assert!(result.stdout.contains("--> src/app.html:2:10"));
    assert!(result.stdout.contains("2 | <p i18n=\"@@intro\">Intro</p>"));
    assert!(result.stdout.contains("= note: missing in: fr"));
    assert!(result.stdout.contains("1 problems (0 errors, 1 warning)"));
    Ok(())
}

#[test]
fn test_unused_translation() -> Result<()> {
    let test = workspace()?;
    test.write_file("src/app.html", "<p>No annotations</p>\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("warning: \"title\"  unused-translation"));
    assert!(result.stdout.contains("--> locale/messages.fr.xlf:7:17"));
    assert!(result.stdout.contains("= note: in fr (\"Titre\")"));
    Ok(())
}

#[test]
fn test_selected_checks_only() -> Result<()> {
    let test = workspace()?;
    test.write_file("src/app.html", "<p>No annotations</p>\n")?;

    let result = run({
        let mut cmd = test.check_command();
        cmd.arg("missing");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert!(result.stdout.contains("no issues found"));
    Ok(())
}

#[test]
fn test_markup_outside_project_root_is_ignored() -> Result<()> {
    let test = workspace()?;
    test.write_file("src/app.html", "<h1 i18n=\"@@title\">Title</h1>\n")?;
    test.write_file("other/page.html", "<p i18n=\"@@intro\">Intro</p>\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(0));
    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::with_file(
        ".i18nlensrc.json",
        r#"{
  "projects": [{ "name": "fr", "translationFile": "locale/messages.fr.xlf" }],
  "ignores": ["**/generated/**"]
}"#,
    )?;
    test.write_file("locale/messages.fr.xlf", XLIFF)?;
    test.write_file("src/app.html", "<h1 i18n=\"@@title\">Title</h1>\n")?;
    test.write_file("src/generated/page.html", "<p i18n=\"@@intro\">Intro</p>\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(0));
    Ok(())
}

#[test]
fn test_broken_json_translation() -> Result<()> {
    let test = CliTest::with_file(
        ".i18nlensrc.json",
        r#"{ "projects": [{ "name": "de", "root": "src", "translationFile": "locale/de.json" }] }"#,
    )?;
    test.write_file("locale/de.json", "{ \"title\": ")?;
    test.write_file("src/app.html", "<h1>Title</h1>\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("parse-error"));
    assert!(result.stdout.contains("--> locale/de.json"));
    Ok(())
}

#[test]
fn test_root_flag() -> Result<()> {
    let test = workspace()?;
    test.write_file("src/app.html", "<p i18n=\"@@intro\">Intro</p>\n")?;
    let outside = CliTest::new()?;

    let result = run({
        let mut cmd = outside.check_command();
        cmd.arg("--root").arg(test.root());
        cmd
    })?;

    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("--> src/app.html:1:10"));
    Ok(())
}

#[test]
fn test_no_projects_warning() -> Result<()> {
    let test = CliTest::with_file("src/app.html", "<p i18n=\"@@intro\">Intro</p>\n")?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(0));
    assert!(result.stderr.contains("no projects configured"));
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(
        ".i18nlensrc.json",
        r#"{ "projects": [{ "name": "", "translationFile": "a.xlf" }] }"#,
    )?;

    let result = run(test.check_command())?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.starts_with("Error:"));
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("--help");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    for command in ["check", "init", "serve"] {
        assert!(result.stdout.contains(command), "missing {}", command);
    }
    Ok(())
}
