use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::aggregate::PEOPLE_PAGE_SIZE;
use crate::query::PAGE_SIZE;

/// Application configuration. Every field has a default so a missing file or
/// an empty one is fine; CLI flags override individual values afterwards.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Movie dataset location (path or http(s) URL).
    pub dataset: String,
    /// Cast roster location (path or http(s) URL).
    pub roster: String,
    /// Database URL; defaults to a SQLite file in the user data dir.
    pub database_url: Option<String>,
    pub page_size: usize,
    pub people_page_size: usize,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: "imdb_tamil_movies_with_cast.json".to_string(),
            roster: "stars.txt".to_string(),
            database_url: None,
            page_size: PAGE_SIZE,
            people_page_size: PEOPLE_PAGE_SIZE,
            theme: "dark".to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location when `path`
    /// is `None`. A missing file yields the defaults; a present but invalid
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config: {}", path.display()))
    }
}

fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("dev", "marquee", "marquee")?;
    Some(proj.config_dir().join("config.toml"))
}
