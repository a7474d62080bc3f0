//! Directory views: one file handle per regular file in a case subdirectory.
//!
//! The directory is listed exactly once, when the view is opened. Files that
//! appear afterwards are not picked up; open a new view to see them.

use crate::error::{CaseError, CaseResult};
use fc_dict::{DictFile, DictResult, DictionaryTool, FieldFile};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file handle a [`Directory`] can open for each of its files.
pub trait FileHandle: Sized {
    fn open_handle(path: &Path, tool: Arc<dyn DictionaryTool>) -> DictResult<Self>;
}

impl FileHandle for DictFile {
    fn open_handle(path: &Path, tool: Arc<dyn DictionaryTool>) -> DictResult<Self> {
        DictFile::open(path, tool)
    }
}

impl FileHandle for FieldFile {
    fn open_handle(path: &Path, tool: Arc<dyn DictionaryTool>) -> DictResult<Self> {
        FieldFile::open(path, tool)
    }
}

/// Ordered mapping from file name to handle.
#[derive(Debug)]
pub struct Directory<F> {
    path: PathBuf,
    files: Vec<(String, F)>,
}

/// The initial-state (`0/`) directory: one field file per field.
pub type InitialStateDir = Directory<FieldFile>;

/// The `constant/` directory of physical and material properties.
pub type PropertiesDir = Directory<DictFile>;

/// Check that `path` exists and is a directory, returning its absolute form.
pub(crate) fn existing_dir(path: &Path) -> CaseResult<PathBuf> {
    let path = std::path::absolute(path)?;
    if !path.exists() {
        return Err(CaseError::NotFound { path });
    }
    if !path.is_dir() {
        return Err(CaseError::NotADirectory { path });
    }
    Ok(path)
}

impl<F: FileHandle> Directory<F> {
    pub fn open(path: impl AsRef<Path>, tool: Arc<dyn DictionaryTool>) -> CaseResult<Self> {
        let path = existing_dir(path.as_ref())?;

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&path)? {
            let entry = entry?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        let files = names
            .into_iter()
            .map(|name| -> CaseResult<(String, F)> {
                let handle = F::open_handle(&path.join(&name), tool.clone())?;
                Ok((name, handle))
            })
            .collect::<CaseResult<Vec<_>>>()?;

        tracing::debug!(dir = %path.display(), files = files.len(), "directory scanned");
        Ok(Self { path, files })
    }
}

impl<F> Directory<F> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.files.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut F> {
        self.files
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    /// Like [`Directory::get`], but a missing file is an error.
    pub fn file(&self, name: &str) -> CaseResult<&F> {
        self.get(name).ok_or_else(|| CaseError::MissingFile {
            dir: self.path.clone(),
            name: name.to_string(),
        })
    }

    pub fn file_mut(&mut self, name: &str) -> CaseResult<&mut F> {
        let dir = self.path.clone();
        self.get_mut(name).ok_or_else(|| CaseError::MissingFile {
            dir,
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &F)> {
        self.files.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Absolute paths of the files seen at open time.
    pub fn files(&self) -> Vec<PathBuf> {
        self.names().map(|n| self.path.join(n)).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub const CONTROL_DICT: &str = "controlDict";

/// The `system/` directory. Opening fails without a `controlDict`.
#[derive(Debug)]
pub struct ConfigDir {
    dir: Directory<DictFile>,
    control_dict: usize,
}

impl ConfigDir {
    pub fn open(path: impl AsRef<Path>, tool: Arc<dyn DictionaryTool>) -> CaseResult<Self> {
        let dir = Directory::open(path, tool)?;
        let Some(control_dict) = dir.files.iter().position(|(n, _)| n == CONTROL_DICT) else {
            return Err(CaseError::IncompleteCase {
                dir: dir.path,
                missing: CONTROL_DICT,
            });
        };
        Ok(Self { dir, control_dict })
    }

    // The file list is fixed at open, so the index stays valid.
    pub fn control_dict(&self) -> &DictFile {
        &self.dir.files[self.control_dict].1
    }

    pub fn control_dict_mut(&mut self) -> &mut DictFile {
        &mut self.dir.files[self.control_dict].1
    }
}

impl Deref for ConfigDir {
    type Target = Directory<DictFile>;

    fn deref(&self) -> &Directory<DictFile> {
        &self.dir
    }
}

impl DerefMut for ConfigDir {
    fn deref_mut(&mut self) -> &mut Directory<DictFile> {
        &mut self.dir
    }
}
