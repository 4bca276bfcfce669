use std::{collections::HashSet, env, fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, Config, ProjectConfig};
use crate::workspace::scan_files;

pub fn init() -> Result<ExitStatus> {
    let root = env::current_dir().context("Failed to determine current directory")?;
    let config_path = root.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    let config = starter_config(&root);
    let json = serde_json::to_string_pretty(&config).context("Failed to generate config.")?;
    fs::write(&config_path, json)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Created {} with {} project(s)",
            CONFIG_FILE_NAME,
            config.projects.len()
        )
        .green()
    );

    Ok(ExitStatus::Success)
}

/// Default config with one project per XLIFF file found under `root`.
pub fn starter_config(root: &Path) -> Config {
    let mut config = Config::default();
    let scan = scan_files(root, &config.ignores);

    let mut names = HashSet::new();
    config.projects = scan
        .files
        .iter()
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("xlf" | "xliff")
            )
        })
        .filter_map(|path| {
            let relative = path.strip_prefix(root).ok()?;
            let name = unique_name(project_name(relative), &mut names);
            Some(ProjectConfig {
                name,
                root: String::new(),
                exclude: Vec::new(),
                translation_file: relative.to_string_lossy().replace('\\', "/"),
            })
        })
        .collect();

    config
}

/// `messages.fr.xlf` is named `fr`, `messages.xlf` keeps its stem.
fn project_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match stem.rsplit_once('.') {
        Some((_, locale)) if !locale.is_empty() => locale.to_string(),
        _ => stem,
    }
}

fn unique_name(base: String, taken: &mut HashSet<String>) -> String {
    let mut name = base.clone();
    let mut n = 2;
    while !taken.insert(name.clone()) {
        name = format!("{}-{}", base, n);
        n += 1;
    }
    name
}
