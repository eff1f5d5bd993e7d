use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::LogLayout;
use crate::fs::RecordFs;
use crate::record::{
    record_file_name, render_custom_template, render_record, Record, RecordError, RecordKind,
    INITIAL_TITLE,
};
use crate::sanitize::sanitize_title;
use crate::store::RecordStore;

/// Creates new record files. Existing records are never touched here.
pub struct RecordWriter<F: RecordFs> {
    fs: F,
    layout: LogLayout,
}

impl<F: RecordFs> RecordWriter<F> {
    pub fn new(fs: F, layout: LogLayout) -> Self {
        Self { fs, layout }
    }

    pub fn create(&self, title: &str, kind: RecordKind) -> Result<Record, RecordError> {
        self.create_on(title, kind, Local::now().date_naive())
    }

    pub fn create_on(
        &self,
        title: &str,
        kind: RecordKind,
        date: NaiveDate,
    ) -> Result<Record, RecordError> {
        let title = match kind {
            RecordKind::Initial => INITIAL_TITLE.to_string(),
            RecordKind::Standard => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(RecordError::InvalidArgument(
                        "record title cannot be empty".to_string(),
                    ));
                }
                // The title is the first line of the file.
                if title.contains(['\n', '\r']) {
                    return Err(RecordError::InvalidArgument(format!(
                        "record title must be a single line: {:?}",
                        title
                    )));
                }
                title.to_string()
            }
        };

        let number = RecordStore::new(&self.fs, self.layout.clone()).next_number()?;
        let doc_dir = &self.layout.doc_dir;
        let path = doc_dir.join(record_file_name(number, &sanitize_title(&title)));

        self.fs
            .create_dir_all(doc_dir)
            .map_err(|err| RecordError::io(doc_dir, err))?;
        let content = match self.load_template(kind)? {
            Some(template) => render_custom_template(&template, number, &title, date),
            None => render_record(number, &title, kind, date),
        };
        self.fs
            .write(&path, &content)
            .map_err(|err| RecordError::io(&path, err))?;

        let path = absolute(&path)?;
        info!(number, title = %title, path = %path.display(), "created record");
        Ok(Record {
            number,
            title,
            path,
        })
    }

    fn load_template(&self, kind: RecordKind) -> Result<Option<String>, RecordError> {
        let Some(template_dir) = &self.layout.template_dir else {
            return Ok(None);
        };
        let path = template_dir.join(kind.template_name());
        match self.fs.read_to_string(&path) {
            Ok(template) => Ok(Some(template)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no custom template, using built-in");
                Ok(None)
            }
            Err(err) => Err(RecordError::io(&path, err)),
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf, RecordError> {
    std::path::absolute(path).map_err(|err| RecordError::io(path, err))
}
