//! Line-anchored insertion into existing record files.

use std::path::Path;

use tracing::{debug, warn};

use crate::fs::RecordFs;
use crate::record::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionMode {
    /// Insert right after the anchor line.
    Append,
    /// Insert right before the anchor line.
    Prepend,
    /// Drop the anchor line and insert in its place.
    Replace,
}

/// What to do when the anchor line is not in a non-empty file.
///
/// An empty file has no anchor to miss: it always receives the block at
/// index 0, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorNotFoundPolicy {
    /// Insert the block at the start of the file.
    #[default]
    InsertAtStart,
    /// Leave a non-empty file untouched.
    Skip,
    /// Return [`RecordError::AnchorNotFound`] for a non-empty file.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchOutcome {
    pub anchor_found: bool,
    /// Index of the first inserted line, `None` when nothing was inserted.
    pub inserted_at: Option<usize>,
}

/// Inserts `new_lines` relative to the first line equal to `anchor`.
///
/// Not idempotent: a second call inserts the block again.
pub fn patch_lines(
    lines: &mut Vec<String>,
    anchor: &str,
    new_lines: &[String],
    mode: InsertionMode,
    policy: AnchorNotFoundPolicy,
) -> PatchOutcome {
    let anchor_idx = lines.iter().position(|line| line == anchor);

    let index = match (anchor_idx, mode) {
        (Some(idx), InsertionMode::Append) => idx + 1,
        (Some(idx), InsertionMode::Prepend) => idx,
        (Some(idx), InsertionMode::Replace) => {
            lines.remove(idx);
            idx
        }
        (None, _) if lines.is_empty() => 0,
        (None, _) => match policy {
            AnchorNotFoundPolicy::InsertAtStart => 0,
            AnchorNotFoundPolicy::Skip | AnchorNotFoundPolicy::Fail => {
                return PatchOutcome {
                    anchor_found: false,
                    inserted_at: None,
                };
            }
        },
    };

    for (offset, line) in new_lines.iter().enumerate() {
        lines.insert(index + offset, line.clone());
    }
    PatchOutcome {
        anchor_found: anchor_idx.is_some(),
        inserted_at: Some(index),
    }
}

pub fn read_lines<F: RecordFs>(fs: &F, path: &Path) -> Result<Vec<String>, RecordError> {
    let text = fs
        .read_to_string(path)
        .map_err(|err| RecordError::io(path, err))?;
    Ok(text.lines().map(|line| line.to_string()).collect())
}

pub fn write_lines<F: RecordFs>(fs: &F, path: &Path, lines: &[String]) -> Result<(), RecordError> {
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    fs.write(path, &text).map_err(|err| RecordError::io(path, err))
}

/// Loads `path`, patches it with [`patch_lines`] and overwrites the whole file.
pub fn patch_file<F: RecordFs>(
    fs: &F,
    path: &Path,
    anchor: &str,
    new_lines: &[String],
    mode: InsertionMode,
    policy: AnchorNotFoundPolicy,
) -> Result<PatchOutcome, RecordError> {
    let mut lines = read_lines(fs, path)?;
    let outcome = patch_lines(&mut lines, anchor, new_lines, mode, policy);

    if !outcome.anchor_found && !lines.is_empty() {
        warn!(path = %path.display(), anchor, ?policy, "anchor line not found");
    }
    let Some(index) = outcome.inserted_at else {
        if policy == AnchorNotFoundPolicy::Fail {
            return Err(RecordError::AnchorNotFound {
                path: path.to_path_buf(),
                anchor: anchor.to_string(),
            });
        }
        return Ok(outcome);
    };

    debug!(path = %path.display(), anchor, index, lines = new_lines.len(), "patching file");
    write_lines(fs, path, &lines)?;
    Ok(outcome)
}
