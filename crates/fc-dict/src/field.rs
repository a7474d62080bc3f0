//! Field files: dictionary files describing a physical field.

use crate::error::{DictError, DictResult};
use crate::file::DictFile;
use crate::query::DictionaryTool;
use crate::view::{DictView, Node};
use fc_core::Dimension;
use std::cell::OnceCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;

/// A [`DictFile`] with three derived views of the field's metadata.
///
/// `dimensions`, `boundaryField` and `internalField` are each memoized on
/// first access and never invalidated, even by writes through this handle.
pub struct FieldFile {
    file: DictFile,
    dimensions: OnceCell<Dimension>,
    boundary_field: OnceCell<DictView>,
    internal_field: OnceCell<Node>,
}

impl FieldFile {
    pub fn open(path: impl AsRef<Path>, tool: Arc<dyn DictionaryTool>) -> DictResult<Self> {
        Ok(Self::from_file(DictFile::open(path, tool)?))
    }

    pub fn from_file(file: DictFile) -> Self {
        Self {
            file,
            dimensions: OnceCell::new(),
            boundary_field: OnceCell::new(),
            internal_field: OnceCell::new(),
        }
    }

    /// Unit of the field, parsed from its `dimensions` entry.
    pub fn dimensions(&self) -> DictResult<Dimension> {
        if let Some(dim) = self.dimensions.get() {
            return Ok(*dim);
        }
        let text = self.file.value("dimensions")?;
        let dim = Dimension::from_bracketed(&text)?;
        Ok(*self.dimensions.get_or_init(|| dim))
    }

    /// Per-patch boundary conditions.
    pub fn boundary_field(&self) -> DictResult<&DictView> {
        if let Some(view) = self.boundary_field.get() {
            return Ok(view);
        }
        let view = self
            .file
            .get("boundaryField")?
            .into_view()
            .ok_or_else(|| DictError::NotADictionary {
                key: "boundaryField".to_string(),
            })?;
        Ok(self.boundary_field.get_or_init(|| view))
    }

    /// Initial value over the mesh, e.g. `uniform 0` or `uniform (0 0 0)`.
    pub fn internal_field(&self) -> DictResult<&Node> {
        if let Some(node) = self.internal_field.get() {
            return Ok(node);
        }
        let node = self.file.get("internalField")?;
        Ok(self.internal_field.get_or_init(|| node))
    }

    /// Field class from the `FoamFile` header (`volScalarField`, ...).
    pub fn class(&self) -> DictResult<String> {
        self.file.value("FoamFile.class")
    }

    pub fn into_inner(self) -> DictFile {
        self.file
    }
}

impl Deref for FieldFile {
    type Target = DictFile;

    fn deref(&self) -> &DictFile {
        &self.file
    }
}

impl DerefMut for FieldFile {
    fn deref_mut(&mut self) -> &mut DictFile {
        &mut self.file
    }
}

impl fmt::Debug for FieldFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldFile")
            .field("file", &self.file)
            .field("dimensions", &self.dimensions.get())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FieldFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.file.fmt(f)
    }
}
