use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DOC_FOLDER: &str = "docs/adr";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrConfig {
    /// Directory holding the records, relative to the config root.
    pub doc_folder: Option<String>,
    /// Directory with `new.md` / `initial.md` templates overriding the built-in ones.
    pub template_folder: Option<String>,
    /// Command used to open new records (e.g. "code --wait").
    pub editor: Option<String>,
}

/// Where a record log lives. Passed explicitly to the store, writer and engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLayout {
    pub doc_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
}

impl LogLayout {
    pub fn new(doc_dir: impl Into<PathBuf>) -> Self {
        Self {
            doc_dir: doc_dir.into(),
            template_dir: None,
        }
    }

    pub fn with_template_dir(mut self, template_dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(template_dir.into());
        self
    }
}

impl AdrConfig {
    pub fn doc_folder(&self) -> &str {
        self.doc_folder
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_DOC_FOLDER)
    }

    pub fn layout(&self, root: &Path) -> LogLayout {
        let template_dir = self
            .template_folder
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| root.join(value));
        LogLayout {
            doc_dir: root.join(self.doc_folder()),
            template_dir,
        }
    }
}

pub fn config_filename_candidates() -> [&'static str; 2] {
    [".adr.toml", ".adrrc"]
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(".adr.toml")
}

pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for candidate in start.ancestors() {
        for name in config_filename_candidates() {
            if candidate.join(name).is_file() {
                return Some(candidate.to_path_buf());
            }
        }
    }
    None
}

/// Reads the first config file present under `root`. A present but broken
/// file is an error rather than silently falling back to defaults.
pub fn load_config(root: &Path) -> Result<Option<AdrConfig>, ConfigError> {
    for name in config_filename_candidates() {
        let path = root.join(name);
        if path.is_file() {
            let text = fs::read_to_string(&path)?;
            return Ok(Some(toml::from_str::<AdrConfig>(&text)?));
        }
    }
    Ok(None)
}

pub fn write_config(root: &Path, config: &AdrConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path(root);
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}
