//! Session configuration.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const ENV_SKILLS: &str = "SKILLTREE_SKILLS";
pub const ENV_RESOURCES: &str = "SKILLTREE_RESOURCES";
pub const ENV_STATS: &str = "SKILLTREE_STATS";
pub const ENV_SAVE_PATH: &str = "SKILLTREE_SAVE_PATH";
pub const ENV_LOG: &str = "SKILLTREE_LOG";

/// Everything needed to bootstrap a skill tree session.
///
/// ```toml
/// skills_path = "skills.ron"
/// resources_path = "resources.ron"
/// stats_path = "stats.ron"
/// log_filter = "info,skilltree_core=debug"
///
/// [initial_balances]
/// gold = 100
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub skills_path: PathBuf,
    pub resources_path: PathBuf,
    #[serde(default)]
    pub stats_path: Option<PathBuf>,
    /// Where progression is persisted.
    #[serde(default)]
    pub save_path: Option<PathBuf>,
    /// Persist to the platform data directory when `save_path` is unset.
    /// With neither set, progress is kept in memory only.
    #[serde(default)]
    pub persist: bool,
    /// Starting wallet balances, keyed by currency.
    #[serde(default)]
    pub initial_balances: BTreeMap<String, i64>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl SessionConfig {
    pub fn new(skills_path: impl Into<PathBuf>, resources_path: impl Into<PathBuf>) -> Self {
        Self {
            skills_path: skills_path.into(),
            resources_path: resources_path.into(),
            stats_path: None,
            save_path: None,
            persist: false,
            initial_balances: BTreeMap::new(),
            log_filter: default_log_filter(),
        }
    }

    /// Override fields from process environment variables.
    ///
    /// Environment variables:
    /// - `SKILLTREE_SKILLS` - Skill definitions file
    /// - `SKILLTREE_RESOURCES` - Resource catalog file
    /// - `SKILLTREE_STATS` - Stat base values file
    /// - `SKILLTREE_SAVE_PATH` - Progression save file
    /// - `SKILLTREE_LOG` - Log filter directive
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| env::var(key).ok());
    }

    /// Same as [`Self::apply_env`], reading variables through `lookup`.
    /// Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = read(ENV_SKILLS) {
            self.skills_path = PathBuf::from(path);
        }
        if let Some(path) = read(ENV_RESOURCES) {
            self.resources_path = PathBuf::from(path);
        }
        if let Some(path) = read(ENV_STATS) {
            self.stats_path = Some(PathBuf::from(path));
        }
        if let Some(path) = read(ENV_SAVE_PATH) {
            self.save_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = read(ENV_LOG) {
            self.log_filter = filter;
        }
    }

    /// Rebase relative paths onto `base`, typically the directory holding
    /// the configuration file.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        rebase(&mut self.skills_path);
        rebase(&mut self.resources_path);
        if let Some(path) = self.stats_path.as_mut() {
            rebase(path);
        }
        if let Some(path) = self.save_path.as_mut() {
            rebase(path);
        }
    }
}
