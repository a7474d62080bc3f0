//! The case aggregate.

use crate::config::Toolchain;
use crate::directory::{ConfigDir, InitialStateDir, PropertiesDir, existing_dir};
use crate::error::{CaseError, CaseResult};
use std::path::{Path, PathBuf};

pub const CONSTANT_DIR: &str = "constant";
pub const SYSTEM_DIR: &str = "system";

/// One simulation working directory and its three typed subdirectory views.
///
/// Opening either yields a fully validated case or fails; no half-built case
/// escapes. The case never changes the directory layout itself except through
/// [`Case::clone_from_template`] and [`Case::remove_time_dirs`].
#[derive(Debug)]
pub struct Case {
    path: PathBuf,
    toolchain: Toolchain,
    initial_state: Option<InitialStateDir>,
    constant: PropertiesDir,
    system: ConfigDir,
}

impl Case {
    /// Open and validate a case directory.
    ///
    /// Checks, in order: the path is a directory; at most one subdirectory has
    /// a name that parses as the number zero (`0`, `0.000`, ...); `constant/`
    /// and `system/` open; `system/` holds a `controlDict`.
    pub fn open(path: impl AsRef<Path>, toolchain: Toolchain) -> CaseResult<Self> {
        let path = existing_dir(path.as_ref())?;

        let initial_state = match find_initial_state_dir(&path)? {
            Some(dir) => Some(InitialStateDir::open(dir, toolchain.tool.clone())?),
            None => None,
        };
        let constant = PropertiesDir::open(path.join(CONSTANT_DIR), toolchain.tool.clone())?;
        let system = ConfigDir::open(path.join(SYSTEM_DIR), toolchain.tool.clone())?;

        tracing::debug!(
            case = %path.display(),
            fields = initial_state.as_ref().map_or(0, |d| d.len()),
            "case opened"
        );

        Ok(Self {
            path,
            toolchain,
            initial_state,
            constant,
            system,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Case directory name, e.g. `cavity`.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// The `0/` directory, when the case has one.
    pub fn initial_state(&self) -> Option<&InitialStateDir> {
        self.initial_state.as_ref()
    }

    pub fn initial_state_mut(&mut self) -> Option<&mut InitialStateDir> {
        self.initial_state.as_mut()
    }

    pub fn constant(&self) -> &PropertiesDir {
        &self.constant
    }

    pub fn constant_mut(&mut self) -> &mut PropertiesDir {
        &mut self.constant
    }

    pub fn system(&self) -> &ConfigDir {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut ConfigDir {
        &mut self.system
    }
}

/// The unique subdirectory whose name parses as zero.
fn find_initial_state_dir(case: &Path) -> CaseResult<Option<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(case)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('0') || !entry.path().is_dir() {
            continue;
        }
        match name.parse::<f64>() {
            Ok(value) if value == 0.0 => candidates.push(entry.path()),
            Ok(_) => {}
            Err(_) => tracing::debug!(dir = %name, "skipping non-numeric zero-prefixed directory"),
        }
    }
    candidates.sort();

    let mut candidates = candidates.into_iter();
    let first = candidates.next();
    if let (Some(first), Some(second)) = (&first, candidates.next()) {
        return Err(CaseError::DuplicateInitialState {
            first: first.clone(),
            second,
        });
    }
    Ok(first)
}
