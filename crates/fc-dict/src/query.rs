//! The dictionary query tool seam.
//!
//! All reads, writes and deletes against a dictionary file go through a
//! [`DictionaryTool`]. The tool is a black box: given a file, an optional
//! entry and a mode it reports success plus whatever it printed.

use crate::error::DictResult;
use fc_core::{CommandOutput, EntryPath};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// List the immediate child keywords of the entry (or of the file root).
    Keywords,
    /// Print the value stored at the entry.
    Value,
    /// Replace the value at the entry, creating the keyword if needed.
    Set(String),
    /// Remove the entry.
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub file: PathBuf,
    pub entry: Option<EntryPath>,
    pub mode: QueryMode,
}

impl Query {
    pub fn keywords(file: &Path, entry: Option<&EntryPath>) -> Self {
        Self {
            file: file.to_path_buf(),
            entry: entry.cloned(),
            mode: QueryMode::Keywords,
        }
    }

    pub fn value(file: &Path, entry: &EntryPath) -> Self {
        Self {
            file: file.to_path_buf(),
            entry: Some(entry.clone()),
            mode: QueryMode::Value,
        }
    }

    pub fn set(file: &Path, entry: &EntryPath, value: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            entry: Some(entry.clone()),
            mode: QueryMode::Set(value.into()),
        }
    }

    pub fn remove(file: &Path, entry: &EntryPath) -> Self {
        Self {
            file: file.to_path_buf(),
            entry: Some(entry.clone()),
            mode: QueryMode::Remove,
        }
    }

    /// `foamDictionary`-style arguments: `<file> [-entry <e>] <mode flags>`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.file.display().to_string()];
        if let Some(entry) = &self.entry {
            args.push("-entry".to_string());
            args.push(entry.to_string());
        }
        match &self.mode {
            QueryMode::Keywords => args.push("-keywords".to_string()),
            QueryMode::Value => args.push("-value".to_string()),
            QueryMode::Set(value) => {
                args.push("-set".to_string());
                args.push(value.clone());
            }
            QueryMode::Remove => args.push("-remove".to_string()),
        }
        args
    }
}

/// Backend that answers dictionary queries.
///
/// `Ok` carries the tool's verdict (a failed lookup is a non-zero status);
/// `Err` means the tool could not be run at all.
pub trait DictionaryTool: Send + Sync {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    fn query(&self, query: &Query) -> DictResult<CommandOutput>;
}

/// Split tool output into one keyword per non-blank line.
pub(crate) fn parse_keywords(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_follow_foam_dictionary_layout() {
        let file = Path::new("/case/system/fvSolution");
        let entry = EntryPath::parse("solvers.p.solver").unwrap();

        assert_eq!(
            Query::keywords(file, None).args(),
            ["/case/system/fvSolution", "-keywords"]
        );
        assert_eq!(
            Query::set(file, &entry, "PCG").args(),
            [
                "/case/system/fvSolution",
                "-entry",
                "solvers.p.solver",
                "-set",
                "PCG"
            ]
        );
        assert_eq!(
            Query::remove(file, &entry).args().last().map(String::as_str),
            Some("-remove")
        );
    }

    #[test]
    fn keywords_skip_blank_lines() {
        let keys = parse_keywords("FoamFile\n\n  dimensions \ninternalField\n");
        assert_eq!(keys, ["FoamFile", "dimensions", "internalField"]);
    }
}
