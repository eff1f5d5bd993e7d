use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, warn};

use adr_core::config::{find_config_root, load_config, write_config, AdrConfig, LogLayout};
use adr_core::editor::open_in_editor;
use adr_core::record::records_to_json;
use adr_core::toc::render_toc;
use adr_core::{
    CrossReferenceEngine, LinkRelation, OsFs, Record, RecordError, RecordKind, RecordStore,
    RecordWriter,
};

struct Workspace {
    root: PathBuf,
    config: AdrConfig,
    layout: LogLayout,
}

impl Workspace {
    fn resolve(start: &Path) -> Result<Self> {
        let root = find_config_root(start).unwrap_or_else(|| start.to_path_buf());
        let config = load_config(&root)
            .with_context(|| format!("failed to load config under {}", root.display()))?
            .unwrap_or_default();
        let layout = config.layout(&root);
        debug!(root = %root.display(), doc_dir = %layout.doc_dir.display(), "resolved record log");
        Ok(Self {
            root,
            config,
            layout,
        })
    }

    fn store(&self) -> RecordStore<OsFs> {
        RecordStore::new(OsFs, self.layout.clone())
    }

    fn writer(&self) -> RecordWriter<OsFs> {
        RecordWriter::new(OsFs, self.layout.clone())
    }

    fn engine(&self) -> CrossReferenceEngine<OsFs> {
        CrossReferenceEngine::new(OsFs, self.layout.clone())
    }

    fn open(&self, record: &Record) {
        if let Err(err) = open_in_editor(&record.path, self.config.editor.as_deref()) {
            warn!(path = %record.path.display(), "could not open record: {err}");
        }
    }
}

pub fn init(start: &Path, directory: Option<&str>, open: bool) -> Result<()> {
    let mut workspace = Workspace::resolve(start)?;
    let has_config = load_config(&workspace.root)?.is_some();
    if directory.is_some() || !has_config {
        if let Some(directory) = directory {
            workspace.config.doc_folder = Some(directory.to_string());
        }
        let path = write_config(&workspace.root, &workspace.config)
            .with_context(|| format!("failed to write config under {}", workspace.root.display()))?;
        debug!(path = %path.display(), "wrote config");
        workspace.layout = workspace.config.layout(&workspace.root);
    }

    let store = workspace.store();
    if store.next_number()? > 1 {
        bail!(
            "record log already initialized in {}",
            workspace.layout.doc_dir.display()
        );
    }

    let record = workspace.writer().create("", RecordKind::Initial)?;
    println!("{}", record.path.display());
    if open {
        workspace.open(&record);
    }
    Ok(())
}

pub fn new_record(
    start: &Path,
    title: &str,
    supersedes: &[u32],
    links: &[String],
    open: bool,
) -> Result<()> {
    let workspace = Workspace::resolve(start)?;
    let record = workspace.writer().create(title, RecordKind::Standard)?;
    println!("{}", record.path.display());

    let engine = workspace.engine();
    let mut failures = 0;
    for number in supersedes {
        if let Err(err) = engine.supersede(*number, &record) {
            eprintln!("Cannot supersede record {number}: {err}");
            failures += 1;
        }
    }
    failures += apply_links(&engine, &record, links);

    if open {
        workspace.open(&record);
    }
    if failures > 0 {
        bail!("{failures} cross-reference(s) could not be applied");
    }
    Ok(())
}

pub fn link(start: &Path, source: u32, tokens: &[String]) -> Result<()> {
    let workspace = Workspace::resolve(start)?;
    let record = workspace
        .store()
        .find_by_number(source)?
        .ok_or_else(|| anyhow!(RecordError::RecordNotFound(source)))?;

    let failures = apply_links(&workspace.engine(), &record, tokens);
    if failures > 0 {
        bail!("{failures} link(s) could not be applied");
    }
    Ok(())
}

/// Applies each token in turn, reporting failures without stopping.
fn apply_links(engine: &CrossReferenceEngine<OsFs>, record: &Record, tokens: &[String]) -> usize {
    let mut failures = 0;
    for token in tokens {
        let result = LinkRelation::parse(token)
            .map_err(anyhow::Error::from)
            .and_then(|relation| engine.link(record, &relation).map_err(anyhow::Error::from));
        match result {
            Ok(target) => debug!(token = %token, target = target.number, "link applied"),
            Err(err) => {
                eprintln!("Cannot apply link {token:?}: {err}");
                failures += 1;
            }
        }
    }
    failures
}

pub fn list(start: &Path, json: bool) -> Result<()> {
    let store = Workspace::resolve(start)?.store();
    if json {
        println!("{}", records_to_json(&store.records()?));
        return Ok(());
    }
    for path in store.list_records()? {
        println!("{}", path.display());
    }
    Ok(())
}

pub fn generate_toc(start: &Path) -> Result<()> {
    let store = Workspace::resolve(start)?.store();
    print!("{}", render_toc(&store.records()?));
    Ok(())
}
