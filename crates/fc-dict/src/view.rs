//! Read-only snapshots of dictionary contents.
//!
//! A [`DictView`] is produced by a single read of a [`crate::DictFile`] and is
//! owned by the caller. It has no mutating methods: changes go through the
//! file handle, which talks to the query tool.

use crate::error::{DictError, DictResult};
use fc_core::entry::split_first;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A node in a dictionary tree: a sub-dictionary or an opaque leaf string.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Node {
    Dict(DictView),
    Value(String),
}

impl Node {
    pub fn value(text: impl Into<String>) -> Self {
        Node::Value(text.into())
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Node::Dict(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Value(v) => Some(v),
            Node::Dict(_) => None,
        }
    }

    pub fn as_view(&self) -> Option<&DictView> {
        match self {
            Node::Dict(view) => Some(view),
            Node::Value(_) => None,
        }
    }

    pub fn into_view(self) -> Option<DictView> {
        match self {
            Node::Dict(view) => Some(view),
            Node::Value(_) => None,
        }
    }

    /// Resolve a dotted path below this node.
    pub fn get(&self, path: &str) -> DictResult<&Node> {
        match self {
            Node::Dict(view) => view.get(path),
            Node::Value(_) => Err(DictError::NotADictionary {
                key: path.to_string(),
            }),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Value(v) => f.write_str(v),
            Node::Dict(view) => view.fmt(f),
        }
    }
}

/// Ordered mapping from keyword to [`Node`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictView {
    entries: Vec<(String, Node)>,
}

impl DictView {
    /// Resolve a dotted path one segment at a time, descending into
    /// sub-dictionaries.
    ///
    /// Descending through a leaf reports the whole requested `path`, the same
    /// as [`Node::get`] on a leaf.
    pub fn get(&self, path: &str) -> DictResult<&Node> {
        let mut view = self;
        let mut rest = path;
        loop {
            let (head, tail) = split_first(rest);
            let node = view.lookup(head)?;
            match (tail, node) {
                (None, node) => return Ok(node),
                (Some(tail), Node::Dict(child)) => {
                    view = child;
                    rest = tail;
                }
                (Some(_), Node::Value(_)) => {
                    return Err(DictError::NotADictionary {
                        key: path.to_string(),
                    });
                }
            }
        }
    }

    /// Resolve a dotted path that must end at a leaf.
    pub fn get_str(&self, path: &str) -> DictResult<&str> {
        self.get(path)?.as_str().ok_or_else(|| DictError::NotAValue {
            key: path.to_string(),
        })
    }

    fn lookup(&self, key: &str) -> DictResult<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
            .ok_or_else(|| DictError::KeyNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Node)> for DictView {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DictView {
    type Item = (&'a str, &'a Node);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Node)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for DictView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for DictView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (k, v) in &self.entries {
            match v {
                Node::Value(value) => write!(f, " {k} {value};")?,
                Node::Dict(view) => write!(f, " {k} {view}")?,
            }
        }
        f.write_str(" }")
    }
}
