//! Filesystem capability used by the store, writer and cross-reference engine.
//!
//! The record directory is the only persistent state, so every operation goes
//! through [`RecordFs`]. [`OsFs`] talks to the disk; [`MemoryFs`] keeps files in
//! memory for tests and dry runs.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait RecordFs {
    fn dir_exists(&self, dir: &Path) -> bool;

    /// Regular files directly inside `dir` (non-recursive).
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Overwrites `path` with `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;
}

impl<T: RecordFs + ?Sized> RecordFs for &T {
    fn dir_exists(&self, dir: &Path) -> bool {
        (**self).dir_exists(dir)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_files(dir)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        (**self).create_dir_all(dir)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl RecordFs for OsFs {
    fn dir_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            // Follows symlinks, so a linked record counts as a file.
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }
}

/// In-memory fake. Single-threaded, like the rest of the engine.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, creating its parent directories.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files.borrow_mut().insert(path, contents.into());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    fn add_dirs(&self, dir: &Path) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl RecordFs for MemoryFs {
    fn dir_exists(&self, dir: &Path) -> bool {
        self.dirs.borrow().contains(dir)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.dir_exists(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", dir.display()),
            ));
        }
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let parent_exists = path
            .parent()
            .map(|parent| parent.as_os_str().is_empty() || self.dir_exists(parent))
            .unwrap_or(true);
        if !parent_exists {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent of {} does not exist", path.display()),
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        self.add_dirs(dir);
        Ok(())
    }
}
