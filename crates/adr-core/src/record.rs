use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub const STATUS_ANCHOR: &str = "## Status";
pub const CONTEXT_ANCHOR: &str = "## Context";
pub const INITIAL_TITLE: &str = "Record Architecture Decisions";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Record directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("Record {0:04} not found")]
    RecordNotFound(u32),
    #[error("Anchor line {anchor:?} not found in {path}")]
    AnchorNotFound { path: PathBuf, anchor: String },
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RecordError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        RecordError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A numbered decision record backed by a single markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub number: u32,
    pub title: String,
    pub path: PathBuf,
}

impl Record {
    /// Final path component, used as the target of markdown links.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    pub fn markdown_link(&self) -> String {
        format!("[{}]({})", self.title, self.file_name().unwrap_or(""))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// The bootstrap record written by `init`.
    Initial,
    Standard,
}

impl RecordKind {
    pub fn template_name(self) -> &'static str {
        match self {
            RecordKind::Initial => "initial.md",
            RecordKind::Standard => "new.md",
        }
    }
}

pub fn pad_number(number: u32) -> String {
    format!("{:04}", number)
}

pub fn record_file_name(number: u32, slug: &str) -> String {
    format!("{}-{}.md", pad_number(number), slug)
}

/// Leading four characters of a file name parsed as a record number.
pub fn number_from_file_name(name: &str) -> Option<u32> {
    name.get(..4)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_digit()))
        .and_then(|prefix| prefix.parse::<u32>().ok())
}

/// Title from a record's first line: strips the `# ` marker and the
/// `{number}. ` prefix written by the templates.
pub fn title_from_heading(line: &str) -> String {
    let line = line.trim_end();
    let heading = line.strip_prefix("# ").unwrap_or(line);
    let re = Regex::new(r"^\d+\.\s+").expect("regex");
    re.replace(heading, "").trim().to_string()
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

pub fn render_record(number: u32, title: &str, kind: RecordKind, date: NaiveDate) -> String {
    let (status, context, decision, consequences) = match kind {
        RecordKind::Initial => (
            "Accepted",
            "We need to record the architectural decisions made on this project.",
            "We will use Architecture Decision Records, as described by Michael Nygard in this article: http://thinkrelevance.com/blog/2011/11/15/documenting-architecture-decisions",
            "See Michael Nygard's article, linked above.",
        ),
        RecordKind::Standard => ("Proposed", "{context}", "{decision}", "{consequences}"),
    };

    let mut lines = Vec::new();
    lines.push(format!("# {}. {}", number, title));
    lines.push(String::new());
    lines.push(date.format("%Y-%m-%d").to_string());
    for (heading, body) in [
        (STATUS_ANCHOR, status),
        (CONTEXT_ANCHOR, context),
        ("## Decision", decision),
        ("## Consequences", consequences),
    ] {
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.push(String::new());
        lines.push(body.to_string());
    }
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

/// Fills `{number}`, `{title}` and `{date}` in a user supplied template.
pub fn render_custom_template(
    template: &str,
    number: u32,
    title: &str,
    date: NaiveDate,
) -> String {
    template
        .replace("{number}", &number.to_string())
        .replace("{title}", title)
        .replace("{date}", &date.format("%Y-%m-%d").to_string())
}

pub fn records_to_json(records: &[Record]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("date")
    }

    #[test]
    fn standard_template_has_fixed_layout() {
        let rendered = render_record(7, "Use Postgres", RecordKind::Standard, date());
        let expected = "# 7. Use Postgres\n\n2024-03-09\n\n## Status\n\nProposed\n\n## Context\n\n{context}\n\n## Decision\n\n{decision}\n\n## Consequences\n\n{consequences}\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn initial_template_is_accepted() {
        let rendered = render_record(1, INITIAL_TITLE, RecordKind::Initial, date());
        assert!(rendered.starts_with("# 1. Record Architecture Decisions\n"));
        assert!(rendered.contains("## Status\n\nAccepted\n"));
        assert!(rendered.contains("Michael Nygard"));
    }

    #[test]
    fn title_from_heading_strips_marker_and_number() {
        assert_eq!(title_from_heading("# 12. My Decision"), "My Decision");
        assert_eq!(title_from_heading("# Plain title"), "Plain title");
        assert_eq!(title_from_heading("No marker\r"), "No marker");
    }

    #[test]
    fn number_from_file_name_requires_four_digits() {
        assert_eq!(number_from_file_name("0042-title.md"), Some(42));
        assert_eq!(number_from_file_name("README.md"), None);
        assert_eq!(number_from_file_name("12.md"), None);
        assert_eq!(number_from_file_name("-123-x.md"), None);
    }

    #[test]
    fn custom_template_fills_known_placeholders_only() {
        let rendered =
            render_custom_template("# {number}. {title}\n{date}\n{context}\n", 3, "X", date());
        assert_eq!(rendered, "# 3. X\n2024-03-09\n{context}\n");
    }

    #[test]
    fn markdown_link_uses_file_name() {
        let record = Record {
            number: 2,
            title: "Two".to_string(),
            path: PathBuf::from("/tmp/docs/0002-two.md"),
        };
        assert_eq!(record.markdown_link(), "[Two](0002-two.md)");
    }
}
