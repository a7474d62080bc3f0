//! Handle to one on-disk dictionary file.

use crate::error::{DictError, DictResult};
use crate::query::{DictionaryTool, Query, parse_keywords};
use crate::view::{DictView, Node};
use fc_core::EntryPath;
use fc_core::entry::SEPARATOR;
use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Mutable, identity-bearing handle to a dictionary file.
///
/// Every read goes to the query tool, so reads after writes always reflect
/// the file on disk. The only state kept between calls is the list of
/// top-level keywords, which [`DictFile::invalidate`] resets after a
/// successful `set` or `delete`.
///
/// Caches are private to the handle: two handles on the same path do not see
/// each other's invalidations, and nothing notices the solver rewriting the
/// file underneath.
pub struct DictFile {
    path: PathBuf,
    tool: Arc<dyn DictionaryTool>,
    keywords: OnceCell<Vec<String>>,
}

impl DictFile {
    /// Open a handle. The path must name an existing regular file; no query
    /// is issued until the first read.
    pub fn open(path: impl AsRef<Path>, tool: Arc<dyn DictionaryTool>) -> DictResult<Self> {
        let path = std::path::absolute(path.as_ref()).map_err(|_| DictError::FileNotFound {
            path: path.as_ref().to_path_buf(),
        })?;
        if !path.exists() {
            return Err(DictError::FileNotFound { path });
        }
        if !path.is_file() {
            return Err(DictError::NotAFile { path });
        }
        Ok(Self {
            path,
            tool,
            keywords: OnceCell::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name, e.g. `controlDict`.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn tool(&self) -> &Arc<dyn DictionaryTool> {
        &self.tool
    }

    /// Read the entry at a dotted path.
    ///
    /// An entry whose children can be enumerated is a sub-dictionary and is
    /// expanded recursively, one query per node; otherwise its value is
    /// returned trimmed. Enumerability wins when both would succeed.
    ///
    /// Entry paths have no escape for `.`, so expanding a sub-dictionary
    /// with a keyword such as `".*"` fails with
    /// [`DictError::UnaddressableKeyword`]; its siblings stay readable by
    /// their own paths.
    pub fn get(&self, entry: &str) -> DictResult<Node> {
        self.resolve(&EntryPath::parse(entry)?)
    }

    /// Read the whole file as a view, expanding every top-level keyword.
    ///
    /// Fails with [`DictError::UnaddressableKeyword`] if any nested keyword
    /// contains `.`.
    pub fn read(&self) -> DictResult<DictView> {
        let keys = self.list_keywords(None)?;
        keys.into_iter()
            .map(|key| -> DictResult<(String, Node)> {
                if key.contains(SEPARATOR) {
                    return Err(DictError::UnaddressableKeyword {
                        parent: self.name().to_string(),
                        keyword: key,
                    });
                }
                let node = self.resolve(&EntryPath::parse(&key)?)?;
                Ok((key, node))
            })
            .collect()
    }

    /// Value-mode query without the enumerability probe.
    pub fn value(&self, entry: &str) -> DictResult<String> {
        let entry = EntryPath::parse(entry)?;
        self.query_value(&entry)
    }

    /// Top-level keywords, cached until the next successful write or delete.
    pub fn keys(&self) -> DictResult<&[String]> {
        if let Some(keys) = self.keywords.get() {
            return Ok(keys);
        }
        let keys = self.list_keywords(None)?;
        Ok(self.keywords.get_or_init(|| keys))
    }

    /// `(keyword, node)` for each cached top-level keyword.
    pub fn items(&self) -> DictResult<Vec<(String, Node)>> {
        self.keys()?
            .iter()
            .map(|key| -> DictResult<(String, Node)> { Ok((key.clone(), self.get(key)?)) })
            .collect()
    }

    /// Write `value`'s textual form at `entry`.
    pub fn set(&mut self, entry: &str, value: impl fmt::Display) -> DictResult<()> {
        let entry = EntryPath::parse(entry)?;
        let output = self
            .tool
            .query(&Query::set(&self.path, &entry, value.to_string()))?;
        if !output.success() {
            return Err(DictError::WriteFailed {
                command: output.command.clone(),
                diagnostic: output.diagnostic(),
            });
        }
        tracing::debug!(file = %self.path.display(), entry = %entry, "entry set");
        self.invalidate();
        Ok(())
    }

    /// Remove `entry` from the file.
    pub fn delete(&mut self, entry: &str) -> DictResult<()> {
        let entry = EntryPath::parse(entry)?;
        let output = self.tool.query(&Query::remove(&self.path, &entry))?;
        if !output.success() {
            return Err(DictError::DeleteFailed {
                command: output.command.clone(),
                diagnostic: output.diagnostic(),
            });
        }
        tracing::debug!(file = %self.path.display(), entry = %entry, "entry removed");
        self.invalidate();
        Ok(())
    }

    /// Drop the cached top-level keyword list.
    pub fn invalidate(&mut self) {
        if self.keywords.take().is_some() {
            tracing::trace!(file = %self.path.display(), "keyword cache invalidated");
        }
    }

    /// Whether the top-level keyword list is currently cached.
    pub fn is_cached(&self) -> bool {
        self.keywords.get().is_some()
    }

    fn resolve(&self, entry: &EntryPath) -> DictResult<Node> {
        let listing = self.tool.query(&Query::keywords(&self.path, Some(entry)))?;
        if listing.success() {
            let view = parse_keywords(&listing.stdout)
                .into_iter()
                .map(|child| -> DictResult<(String, Node)> {
                    if child.contains(SEPARATOR) {
                        return Err(DictError::UnaddressableKeyword {
                            parent: entry.to_string(),
                            keyword: child,
                        });
                    }
                    let node = self.resolve(&entry.child(&child)?)?;
                    Ok((child, node))
                })
                .collect::<DictResult<DictView>>()?;
            return Ok(Node::Dict(view));
        }
        self.query_value(entry).map(Node::Value)
    }

    fn query_value(&self, entry: &EntryPath) -> DictResult<String> {
        let output = self.tool.query(&Query::value(&self.path, entry))?;
        if output.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            Err(DictError::NoSuchEntry {
                entry: entry.to_string(),
                command: output.command.clone(),
                diagnostic: output.diagnostic(),
            })
        }
    }

    fn list_keywords(&self, entry: Option<&EntryPath>) -> DictResult<Vec<String>> {
        let output = self.tool.query(&Query::keywords(&self.path, entry))?;
        if output.success() {
            Ok(parse_keywords(&output.stdout))
        } else {
            Err(DictError::QueryFailed {
                command: output.command.clone(),
                diagnostic: output.diagnostic(),
            })
        }
    }
}

impl fmt::Debug for DictFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictFile")
            .field("path", &self.path)
            .field("tool", &self.tool.name())
            .field("keywords", &self.keywords.get())
            .finish()
    }
}

impl fmt::Display for DictFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
