//! Custom notifications understood by the server, next to the standard
//! protocol.

use serde::{Deserialize, Serialize};

use crate::config::ProjectConfig;

/// `i18nLens/projectsUpdated`: replaces the project list. Entries use the
/// config file shape.
pub const PROJECTS_UPDATED: &str = "i18nLens/projectsUpdated";

/// `i18nLens/translationsLoaded`: the client finished pushing translation
/// files; revalidate open documents.
pub const TRANSLATIONS_LOADED: &str = "i18nLens/translationsLoaded";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsUpdatedParams {
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}
