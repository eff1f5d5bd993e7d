use crate::record::Record;

pub const TOC_HEADING: &str = "# Architecture Decision Records";

/// Markdown index of the records, in the order given.
pub fn render_toc(records: &[Record]) -> String {
    let mut lines = vec![TOC_HEADING.to_string(), String::new()];
    for record in records {
        lines.push(format!(
            "* [{}. {}]({})",
            record.number,
            record.title,
            record.file_name().unwrap_or("")
        ));
    }
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn render_toc_lists_records() {
        let records = vec![
            Record {
                number: 1,
                title: "Record Architecture Decisions".to_string(),
                path: PathBuf::from("docs/adr/0001-record_architecture_decisions.md"),
            },
            Record {
                number: 2,
                title: "Use Rust".to_string(),
                path: PathBuf::from("docs/adr/0002-use_rust.md"),
            },
        ];
        assert_eq!(
            render_toc(&records),
            "# Architecture Decision Records\n\n\
* [1. Record Architecture Decisions](0001-record_architecture_decisions.md)\n\
* [2. Use Rust](0002-use_rust.md)\n"
        );
    }

    #[test]
    fn render_toc_without_records_is_heading_only() {
        assert_eq!(render_toc(&[]), "# Architecture Decision Records\n\n");
    }
}
