use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::Project;
use crate::core::utils::anchor_pattern;

pub const CONFIG_FILE_NAME: &str = ".i18nlensrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

/// One project entry. Paths are relative to the workspace root unless
/// absolute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub translation_file: String,
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**", "**/.git/**"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` or a project's
    /// `exclude`, and for duplicate project names.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        let mut names = HashSet::new();
        for project in &self.projects {
            if project.name.is_empty() {
                bail!("Project names must not be empty");
            }
            if !names.insert(project.name.as_str()) {
                bail!("Duplicate project name: \"{}\"", project.name);
            }
            for pattern in &project.exclude {
                Pattern::new(pattern).with_context(|| {
                    format!(
                        "Invalid glob pattern in 'exclude' of project \"{}\": \"{}\"",
                        project.name, pattern
                    )
                })?;
            }
        }

        Ok(())
    }

    /// Resolve project entries against the workspace root.
    pub fn resolve_projects(&self, root_dir: &Path) -> Vec<Project> {
        self.projects
            .iter()
            .map(|project| project.resolve(root_dir))
            .collect()
    }
}

impl ProjectConfig {
    /// Make `root` and `exclude` absolute; keep `translationFile` as a path
    /// fragment without a leading `./`.
    pub fn resolve(&self, root_dir: &Path) -> Project {
        let workspace = root_dir.to_string_lossy();

        let root = {
            let relative = self.root.strip_prefix("./").unwrap_or(&self.root);
            if relative.is_empty() || relative == "." {
                workspace.trim_end_matches('/').to_string()
            } else if Path::new(relative).is_absolute() {
                relative.to_string()
            } else {
                root_dir.join(relative).to_string_lossy().to_string()
            }
        };

        let exclude = self
            .exclude
            .iter()
            .map(|pattern| anchor_pattern(&workspace, pattern))
            .collect();

        let translation_file = self
            .translation_file
            .strip_prefix("./")
            .unwrap_or(&self.translation_file);

        Project::new(self.name.clone(), root, exclude, translation_file)
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` if using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
