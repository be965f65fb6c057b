//! formgrade configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file::FileStore;

/// Top-level formgrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormgradeConfig {
    /// Root directory of the file store.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Log raw answer payloads at debug level when scoring.
    #[serde(default)]
    pub log_answers: bool,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("./formgrade-data")
}

impl Default for FormgradeConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            log_answers: false,
        }
    }
}

impl FormgradeConfig {
    /// Open the file store this configuration points at.
    pub fn open_store(&self) -> FileStore {
        FileStore::new(&self.store_dir)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `formgrade.toml` in the current directory
/// 2. `~/.config/formgrade/config.toml`
///
/// Environment variable override: `FORMGRADE_STORE_DIR`.
pub fn load_config() -> Result<FormgradeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<FormgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("formgrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FormgradeConfig::default(),
    };

    if let Ok(dir) = std::env::var("FORMGRADE_STORE_DIR") {
        if !dir.is_empty() {
            config.store_dir = PathBuf::from(dir);
        }
    }

    Ok(config)
}

fn parse_config(content: &str) -> Result<FormgradeConfig> {
    let mut config: FormgradeConfig = toml::from_str(content)?;
    let store_dir = config.store_dir.to_string_lossy().into_owned();
    config.store_dir = PathBuf::from(resolve_env_vars(&store_dir));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("formgrade"))
}
