//! Supersede and link relations between two record files.
//!
//! Both operations write two files one after the other. There is no rollback:
//! if the second write fails the first edit stays on disk.

use std::io::ErrorKind;

use tracing::{debug, info};

use crate::config::LogLayout;
use crate::fs::RecordFs;
use crate::link::LinkRelation;
use crate::patch::{patch_file, read_lines, write_lines, AnchorNotFoundPolicy, InsertionMode};
use crate::record::{Record, RecordError, CONTEXT_ANCHOR, STATUS_ANCHOR};
use crate::store::RecordStore;

/// What to do with a status section whose anchors are missing or out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedStatusPolicy {
    /// Leave the file as is and carry on with the cross-reference lines.
    #[default]
    SilentSkip,
    Fail,
}

pub struct CrossReferenceEngine<F: RecordFs> {
    fs: F,
    layout: LogLayout,
    anchor_policy: AnchorNotFoundPolicy,
    status_policy: MalformedStatusPolicy,
}

impl<F: RecordFs> CrossReferenceEngine<F> {
    pub fn new(fs: F, layout: LogLayout) -> Self {
        Self {
            fs,
            layout,
            anchor_policy: AnchorNotFoundPolicy::default(),
            status_policy: MalformedStatusPolicy::default(),
        }
    }

    pub fn with_anchor_policy(mut self, policy: AnchorNotFoundPolicy) -> Self {
        self.anchor_policy = policy;
        self
    }

    pub fn with_status_policy(mut self, policy: MalformedStatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Marks record `target_number` as superseded by `new_record`.
    ///
    /// Clears the target's status body, then writes `Supercedes:` into the new
    /// record and `Superceded by:` into the target, both above `## Context`.
    pub fn supersede(&self, target_number: u32, new_record: &Record) -> Result<Record, RecordError> {
        if target_number == 0 {
            return Err(RecordError::InvalidArgument(
                "superseded record number must be positive".to_string(),
            ));
        }
        let new_name = require_file_name(new_record)?;
        self.require_on_disk(new_record)?;
        let target = self.resolve(target_number)?;
        if target.number == new_record.number && target.file_name() == Some(new_name) {
            return Err(RecordError::InvalidArgument(format!(
                "record {:04} cannot supersede itself",
                target_number
            )));
        }
        require_file_name(&target)?;

        self.clear_status(&target)?;
        self.prepend_context(
            new_record,
            vec![
                format!("Supercedes: {}", target.markdown_link()),
                String::new(),
            ],
        )?;
        self.prepend_context(
            &target,
            vec![
                String::new(),
                format!("Superceded by: {}", new_record.markdown_link()),
                String::new(),
            ],
        )?;

        info!(
            superseded = target.number,
            by = new_record.number,
            "superseded record"
        );
        Ok(target)
    }

    /// Writes `relation` into `new_record` and its reverse into the target.
    /// The status section is left alone.
    pub fn link(&self, new_record: &Record, relation: &LinkRelation) -> Result<Record, RecordError> {
        if relation.forward_label.trim().is_empty() || relation.reverse_label.trim().is_empty() {
            return Err(RecordError::InvalidArgument(format!(
                "link labels cannot be empty: {}",
                relation
            )));
        }
        require_file_name(new_record)?;
        self.require_on_disk(new_record)?;
        let target = self.resolve(relation.target_number)?;
        require_file_name(&target)?;

        self.prepend_context(
            new_record,
            vec![
                format!("{}: {}", relation.forward_label, target.markdown_link()),
                String::new(),
            ],
        )?;
        self.prepend_context(
            &target,
            vec![
                String::new(),
                format!("{}: {}", relation.reverse_label, new_record.markdown_link()),
                String::new(),
            ],
        )?;

        info!(
            from = new_record.number,
            to = target.number,
            label = %relation.forward_label,
            "linked records"
        );
        Ok(target)
    }

    fn resolve(&self, number: u32) -> Result<Record, RecordError> {
        RecordStore::new(&self.fs, self.layout.clone())
            .find_by_number(number)?
            .ok_or(RecordError::RecordNotFound(number))
    }

    /// Rejects a handle whose file is gone before any file is edited.
    fn require_on_disk(&self, record: &Record) -> Result<(), RecordError> {
        match self.fs.read_to_string(&record.path) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(RecordError::InvalidArgument(format!(
                    "record {:04} does not exist: {}",
                    record.number,
                    record.path.display()
                )))
            }
            Err(err) => Err(RecordError::io(&record.path, err)),
        }
    }

    fn prepend_context(&self, record: &Record, lines: Vec<String>) -> Result<(), RecordError> {
        patch_file(
            &self.fs,
            &record.path,
            CONTEXT_ANCHOR,
            &lines,
            InsertionMode::Prepend,
            self.anchor_policy,
        )
        .map(|_| ())
    }

    /// Removes every line strictly between `## Status` and `## Context`.
    fn clear_status(&self, record: &Record) -> Result<(), RecordError> {
        let mut lines = read_lines(&self.fs, &record.path)?;
        let status_idx = lines.iter().position(|line| line == STATUS_ANCHOR);
        let context_idx = lines.iter().position(|line| line == CONTEXT_ANCHOR);

        let (status_idx, context_idx) = match (status_idx, context_idx) {
            (Some(status), Some(context)) if context > status => (status, context),
            _ => {
                return match self.status_policy {
                    MalformedStatusPolicy::SilentSkip => {
                        debug!(path = %record.path.display(), "status section malformed, not cleared");
                        Ok(())
                    }
                    MalformedStatusPolicy::Fail => Err(RecordError::AnchorNotFound {
                        path: record.path.clone(),
                        anchor: STATUS_ANCHOR.to_string(),
                    }),
                };
            }
        };

        lines.drain(status_idx + 1..context_idx);
        write_lines(&self.fs, &record.path, &lines)
    }
}

fn require_file_name(record: &Record) -> Result<&str, RecordError> {
    record.file_name().ok_or_else(|| {
        RecordError::InvalidArgument(format!(
            "record {:04} has no file name: {}",
            record.number,
            record.path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::record::{render_record, RecordKind};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    const DIR: &str = "/repo/docs/adr";

    fn seed(fs: &MemoryFs, number: u32, slug: &str, title: &str) -> Record {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
        let path = PathBuf::from(DIR).join(format!("{:04}-{}.md", number, slug));
        fs.insert(&path, render_record(number, title, RecordKind::Standard, date));
        Record {
            number,
            title: title.to_string(),
            path,
        }
    }

    fn engine(fs: &MemoryFs) -> CrossReferenceEngine<&MemoryFs> {
        CrossReferenceEngine::new(fs, LogLayout::new(DIR))
    }

    #[test]
    fn supersede_clears_status_and_writes_both_lines() {
        let fs = MemoryFs::new();
        seed(&fs, 1, "old", "Old");
        let new_record = seed(&fs, 2, "new", "New");

        let target = engine(&fs).supersede(1, &new_record).expect("supersede");
        assert_eq!(target.number, 1);

        let old = fs.contents(Path::new("/repo/docs/adr/0001-old.md")).expect("old");
        assert!(old.contains(
            "## Status\n\nSuperceded by: [New](0002-new.md)\n\n## Context\n"
        ));
        assert!(!old.contains("Proposed"));

        let new = fs.contents(&new_record.path).expect("new");
        assert!(new.contains(
            "## Status\n\nProposed\n\nSupercedes: [Old](0001-old.md)\n\n## Context\n"
        ));
    }

    #[test]
    fn supersede_missing_target_is_not_found() {
        let fs = MemoryFs::new();
        let new_record = seed(&fs, 1, "new", "New");
        let err = engine(&fs).supersede(9, &new_record).expect_err("missing");
        assert!(matches!(err, RecordError::RecordNotFound(9)));
        assert_eq!(
            fs.contents(&new_record.path),
            Some(render_record(
                1,
                "New",
                RecordKind::Standard,
                NaiveDate::from_ymd_opt(2024, 5, 1).expect("date")
            ))
        );
    }

    #[test]
    fn supersede_rejects_zero_and_self() {
        let fs = MemoryFs::new();
        let record = seed(&fs, 1, "only", "Only");
        assert!(matches!(
            engine(&fs).supersede(0, &record),
            Err(RecordError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine(&fs).supersede(1, &record),
            Err(RecordError::InvalidArgument(_))
        ));
    }

    #[test]
    fn stale_new_record_leaves_target_untouched() {
        let fs = MemoryFs::new();
        let target = seed(&fs, 1, "old", "Old");
        let before = fs.contents(&target.path);
        let stale = Record {
            number: 2,
            title: "New".to_string(),
            path: PathBuf::from(DIR).join("0002-new.md"),
        };

        let err = engine(&fs).supersede(1, &stale).expect_err("stale");
        assert!(matches!(err, RecordError::InvalidArgument(_)));
        let relation = LinkRelation::parse("1:Amends:Amended by").expect("parse");
        let err = engine(&fs).link(&stale, &relation).expect_err("stale");
        assert!(matches!(err, RecordError::InvalidArgument(_)));

        assert_eq!(fs.contents(&target.path), before);
        assert_eq!(fs.contents(&stale.path), None);
    }

    #[test]
    fn supersede_skips_malformed_status_but_still_links() {
        let fs = MemoryFs::new();
        let old_path = PathBuf::from(DIR).join("0001-old.md");
        fs.insert(&old_path, "# 1. Old\n\n## Context\n\nctx\n\n## Status\n\nAccepted\n");
        let new_record = seed(&fs, 2, "new", "New");

        engine(&fs).supersede(1, &new_record).expect("supersede");
        let old = fs.contents(&old_path).expect("old");
        assert_eq!(
            old,
            "# 1. Old\n\n\nSuperceded by: [New](0002-new.md)\n\n## Context\n\nctx\n\n## Status\n\nAccepted\n"
        );
    }

    #[test]
    fn supersede_fail_policy_rejects_malformed_status() {
        let fs = MemoryFs::new();
        fs.insert(PathBuf::from(DIR).join("0001-old.md"), "# 1. Old\n\nno sections\n");
        let new_record = seed(&fs, 2, "new", "New");
        let err = engine(&fs)
            .with_status_policy(MalformedStatusPolicy::Fail)
            .supersede(1, &new_record)
            .expect_err("malformed");
        assert!(matches!(err, RecordError::AnchorNotFound { .. }));
    }

    #[test]
    fn link_writes_forward_and_reverse_lines() {
        let fs = MemoryFs::new();
        seed(&fs, 1, "base", "Base");
        let new_record = seed(&fs, 2, "amend", "Amend");
        let relation = LinkRelation::parse("1:Amends:Amended by").expect("parse");

        engine(&fs).link(&new_record, &relation).expect("link");

        let base = fs.contents(Path::new("/repo/docs/adr/0001-base.md")).expect("base");
        assert!(base.contains("## Status\n\nProposed\n\n\nAmended by: [Amend](0002-amend.md)\n\n## Context\n"));
        let new = fs.contents(&new_record.path).expect("new");
        assert!(new.contains("Proposed\n\nAmends: [Base](0001-base.md)\n\n## Context\n"));
    }

    #[test]
    fn link_to_missing_record_leaves_files_untouched() {
        let fs = MemoryFs::new();
        let new_record = seed(&fs, 1, "new", "New");
        let before = fs.contents(&new_record.path);
        let relation = LinkRelation::parse("5:Amends:Amended by").expect("parse");
        let err = engine(&fs).link(&new_record, &relation).expect_err("missing");
        assert!(matches!(err, RecordError::RecordNotFound(5)));
        assert_eq!(fs.contents(&new_record.path), before);
    }

    #[test]
    fn link_rejects_blank_labels() {
        let fs = MemoryFs::new();
        seed(&fs, 1, "base", "Base");
        let new_record = seed(&fs, 2, "new", "New");
        let relation = LinkRelation {
            target_number: 1,
            forward_label: " ".to_string(),
            reverse_label: "Amended by".to_string(),
        };
        assert!(matches!(
            engine(&fs).link(&new_record, &relation),
            Err(RecordError::InvalidArgument(_))
        ));
    }
}
