use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No editor configured and no system opener found")]
    MissingEditor,
    #[error("Invalid editor command {0:?}")]
    InvalidCommand(String),
    #[error("Failed to launch editor: {0}")]
    Launch(#[from] std::io::Error),
    #[error("Editor exited with {0}")]
    Failed(std::process::ExitStatus),
}

/// Editor command, first match wins: configured value, `VISUAL`, `EDITOR`,
/// then the platform's default opener.
pub fn resolve_editor_command(
    configured: Option<&str>,
    env_map: Option<&HashMap<String, String>>,
) -> Result<Vec<String>, EditorError> {
    let env_map = env_map.cloned().unwrap_or_else(|| env::vars().collect());
    let candidate = configured
        .map(str::to_string)
        .or_else(|| env_map.get("VISUAL").cloned())
        .or_else(|| env_map.get("EDITOR").cloned())
        .filter(|value| !value.trim().is_empty());
    if let Some(raw) = candidate {
        let parts = shell_words::split(&raw).map_err(|_| EditorError::InvalidCommand(raw.clone()))?;
        if parts.is_empty() {
            return Err(EditorError::InvalidCommand(raw));
        }
        return Ok(parts);
    }
    system_opener().ok_or(EditorError::MissingEditor)
}

#[cfg(windows)]
fn system_opener() -> Option<Vec<String>> {
    Some(vec![
        "cmd".to_string(),
        "/C".to_string(),
        "start".to_string(),
        String::new(),
    ])
}

#[cfg(not(windows))]
fn system_opener() -> Option<Vec<String>> {
    ["xdg-open", "open"]
        .iter()
        .find_map(|name| which::which(name).ok())
        .map(|path| vec![path.to_string_lossy().to_string()])
}

pub fn open_in_editor(path: &Path, configured: Option<&str>) -> Result<(), EditorError> {
    let command = resolve_editor_command(configured, None)?;
    let (program, args) = command
        .split_first()
        .ok_or_else(|| EditorError::InvalidCommand(String::new()))?;
    debug!(program = %program, path = %path.display(), "opening record");
    let status = Command::new(program).args(args).arg(path).status()?;
    if !status.success() {
        return Err(EditorError::Failed(status));
    }
    Ok(())
}
