use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/locale/messages.fr.xlf", "<xliff/>")?;
    test.write_file("src/locale/messages.de.xlf", "<xliff/>")?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(result.code, Some(0));
    assert_eq!(
        result.stdout,
        "\u{2713} Created .i18nlensrc.json with 2 project(s)\n"
    );

    let content = test.read_file(".i18nlensrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    let files: Vec<&str> = parsed["projects"]
        .as_array()
        .context("Config should have 'projects'")?
        .iter()
        .filter_map(|p| p["translationFile"].as_str())
        .collect();
    assert_eq!(
        files,
        vec!["src/locale/messages.de.xlf", "src/locale/messages.fr.xlf"]
    );
    assert!(parsed.get("ignores").is_some());
    // 2-space indentation
    assert!(content.contains("\n  \"projects\""));

    Ok(())
}

#[test]
fn test_init_config_is_usable() -> Result<()> {
    let test = CliTest::with_file(
        "src/locale/messages.fr.xlf",
        r#"<trans-unit id="title"><target>Titre</target></trans-unit>"#,
    )?;
    test.write_file("src/app.html", "<h1 i18n=\"@@title\">Title</h1>\n")?;

    let init = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(init.code, Some(0));

    let check = run(test.check_command())?;
    assert_eq!(check.code, Some(0));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".i18nlensrc.json", "{}")?;

    let result = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(result.code, Some(1));
    assert!(result.stderr.contains(".i18nlensrc.json already exists"));
    assert_eq!(test.read_file(".i18nlensrc.json")?, "{}");

    Ok(())
}
