//! Directory scanning: listing, lookup by number and number allocation.
//!
//! The directory is the only source of truth. Nothing is cached between
//! calls, every query rescans it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::LogLayout;
use crate::fs::RecordFs;
use crate::record::{
    is_markdown, number_from_file_name, pad_number, title_from_heading, Record, RecordError,
};

pub struct RecordStore<F: RecordFs> {
    fs: F,
    layout: LogLayout,
}

impl<F: RecordFs> RecordStore<F> {
    pub fn new(fs: F, layout: LogLayout) -> Self {
        Self { fs, layout }
    }

    pub fn doc_dir(&self) -> &Path {
        &self.layout.doc_dir
    }

    /// Every `.md` file directly inside the doc directory, sorted by path.
    pub fn list_records(&self) -> Result<Vec<PathBuf>, RecordError> {
        let dir = self.doc_dir();
        if !self.fs.dir_exists(dir) {
            return Err(RecordError::DirectoryNotFound(dir.to_path_buf()));
        }
        let mut files: Vec<PathBuf> = self
            .fs
            .list_files(dir)
            .map_err(|err| RecordError::io(dir, err))?
            .into_iter()
            .filter(|path| is_markdown(path))
            .collect();
        files.sort();
        Ok(files)
    }

    /// First listed file whose name starts with the zero-padded number.
    pub fn find_by_number(&self, number: u32) -> Result<Option<Record>, RecordError> {
        let needle = pad_number(number);
        let found = self
            .list_records()?
            .into_iter()
            .find(|path| file_name(path).starts_with(&needle));
        match found {
            Some(path) => self.load_record(number, &path).map(Some),
            None => {
                debug!(number, dir = %self.doc_dir().display(), "record not found");
                Ok(None)
            }
        }
    }

    /// `max + 1` over numbered files, `1` for an empty or missing directory.
    pub fn next_number(&self) -> Result<u32, RecordError> {
        if !self.fs.dir_exists(self.doc_dir()) {
            return Ok(1);
        }
        let max = self
            .list_records()?
            .iter()
            .filter_map(|path| number_from_file_name(file_name(path)))
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }

    /// All numbered records, ordered by number.
    pub fn records(&self) -> Result<Vec<Record>, RecordError> {
        let mut records = Vec::new();
        for path in self.list_records()? {
            if let Some(number) = number_from_file_name(file_name(&path)) {
                records.push(self.load_record(number, &path)?);
            }
        }
        records.sort_by_key(|record| record.number);
        Ok(records)
    }

    fn load_record(&self, number: u32, path: &Path) -> Result<Record, RecordError> {
        let text = self
            .fs
            .read_to_string(path)
            .map_err(|err| RecordError::io(path, err))?;
        let title = text.lines().next().map(title_from_heading).unwrap_or_default();
        Ok(Record {
            number,
            title,
            path: path.to_path_buf(),
        })
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|name| name.to_str()).unwrap_or("")
}
