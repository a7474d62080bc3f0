//! In-process dictionary backend.
//!
//! `MemoryDictionary` keeps one ordered keyword tree per file path and answers
//! the four query modes the way `foamDictionary` does, so dictionary and case
//! logic can be exercised without a solver installation:
//!
//! - keywords of a leaf fail, value of a sub-dictionary fails
//! - `set` needs the parent dictionary to exist and appends new keywords
//! - `remove` of a missing entry fails
//! - any query against an unregistered file fails

use crate::error::DictResult;
use crate::query::{DictionaryTool, Query, QueryMode};
use fc_core::CommandOutput;
use fc_core::entry::split_first;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type Entries = Vec<(String, MemNode)>;

#[derive(Debug, Clone)]
enum MemNode {
    Dict(Entries),
    Value(String),
}

#[derive(Debug, Default)]
pub struct MemoryDictionary {
    files: Mutex<HashMap<PathBuf, Entries>>,
    queries: AtomicUsize,
}

impl MemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty file.
    pub fn add_file(&self, file: impl AsRef<Path>) {
        self.lock()
            .entry(file.as_ref().to_path_buf())
            .or_default();
    }

    /// Store `value` at `entry`, creating the file and any intermediate
    /// dictionaries on the way.
    pub fn seed(&self, file: impl AsRef<Path>, entry: &str, value: &str) {
        let mut files = self.lock();
        let mut entries = files.entry(file.as_ref().to_path_buf()).or_default();
        let mut path = entry;
        loop {
            let (head, rest) = split_first(path);
            match rest {
                None => {
                    upsert(entries, head, MemNode::Value(value.to_string()));
                    return;
                }
                Some(rest) => {
                    let pos = match entries.iter().position(|(k, _)| k == head) {
                        Some(pos) => pos,
                        None => {
                            entries.push((head.to_string(), MemNode::Dict(Vec::new())));
                            entries.len() - 1
                        }
                    };
                    let node = &mut entries[pos].1;
                    if let MemNode::Value(_) = node {
                        *node = MemNode::Dict(Vec::new());
                    }
                    let MemNode::Dict(children) = node else {
                        unreachable!("node was just made a dictionary");
                    };
                    entries = children;
                    path = rest;
                }
            }
        }
    }

    /// Number of queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Entries>> {
        // Each edit is a single push, replace or remove; poisoning is ignored.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn answer(&self, query: &Query) -> Result<String, String> {
        let mut files = self.lock();
        let root = files
            .get_mut(&query.file)
            .ok_or_else(|| format!("Cannot open file {}", query.file.display()))?;
        let entry = query.entry.as_ref().map(|e| e.as_str());

        match &query.mode {
            QueryMode::Keywords => {
                let children = match entry {
                    None => &*root,
                    Some(path) => match find(root, path) {
                        Some(MemNode::Dict(children)) => children,
                        Some(MemNode::Value(_)) => {
                            return Err(format!("keyword {path} is not a dictionary"));
                        }
                        None => return Err(not_found(path)),
                    },
                };
                Ok(children
                    .iter()
                    .map(|(k, _)| format!("{k}\n"))
                    .collect::<String>())
            }
            QueryMode::Value => {
                let path = entry.ok_or("-value requires -entry")?;
                match find(root, path) {
                    Some(MemNode::Value(v)) => Ok(format!("{v}\n")),
                    Some(MemNode::Dict(_)) => Err(format!("keyword {path} is a dictionary")),
                    None => Err(not_found(path)),
                }
            }
            QueryMode::Set(value) => {
                let path = entry.ok_or("-set requires -entry")?;
                let (parent, key) = split_last(path);
                let parent = dict_mut(root, parent).ok_or_else(|| not_found(path))?;
                upsert(parent, key, MemNode::Value(value.clone()));
                Ok(String::new())
            }
            QueryMode::Remove => {
                let path = entry.ok_or("-remove requires -entry")?;
                let (parent, key) = split_last(path);
                let parent = dict_mut(root, parent).ok_or_else(|| not_found(path))?;
                let pos = parent
                    .iter()
                    .position(|(k, _)| k == key)
                    .ok_or_else(|| not_found(path))?;
                parent.remove(pos);
                Ok(String::new())
            }
        }
    }
}

impl DictionaryTool for MemoryDictionary {
    fn name(&self) -> &str {
        "memoryDictionary"
    }

    fn query(&self, query: &Query) -> DictResult<CommandOutput> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let command = format!("{} {}", self.name(), query.args().join(" "));
        Ok(match self.answer(query) {
            Ok(stdout) => CommandOutput {
                command,
                status: Some(0),
                stdout,
                stderr: String::new(),
            },
            Err(stderr) => CommandOutput {
                command,
                status: Some(1),
                stdout: String::new(),
                stderr: format!("--> FOAM FATAL IO ERROR: {stderr}\n"),
            },
        })
    }
}

fn not_found(path: &str) -> String {
    format!("Cannot find entry {path}")
}

fn split_last(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once('.') {
        Some((parent, key)) => (Some(parent), key),
        None => (None, path),
    }
}

fn upsert(entries: &mut Entries, key: &str, node: MemNode) {
    match entries.iter_mut().find(|(k, _)| k == key) {
        Some((_, slot)) => *slot = node,
        None => entries.push((key.to_string(), node)),
    }
}

fn find<'a>(entries: &'a Entries, path: &str) -> Option<&'a MemNode> {
    let (head, rest) = split_first(path);
    let (_, node) = entries.iter().find(|(k, _)| k == head)?;
    match (rest, node) {
        (None, node) => Some(node),
        (Some(rest), MemNode::Dict(children)) => find(children, rest),
        (Some(_), MemNode::Value(_)) => None,
    }
}

fn dict_mut<'a>(entries: &'a mut Entries, path: Option<&str>) -> Option<&'a mut Entries> {
    let Some(path) = path else {
        return Some(entries);
    };
    let (head, rest) = split_first(path);
    let (_, node) = entries.iter_mut().find(|(k, _)| k == head)?;
    match node {
        MemNode::Dict(children) => dict_mut(children, rest),
        MemNode::Value(_) => None,
    }
}
