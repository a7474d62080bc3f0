//! Tool configuration and the toolchain a case talks through.

use crate::error::CaseResult;
use fc_core::{CommandRunner, SystemRunner};
use fc_dict::{DictionaryTool, FoamDictionary};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Environment variables set by sourcing an OpenFOAM `etc/bashrc`.
pub const INSTALLATION_VARS: [&str; 2] = ["WM_PROJECT_DIR", "FOAM_APP"];

/// Executable names for the solver-suite tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolNames {
    pub foam_dictionary: String,
    pub block_mesh: String,
    pub set_fields: String,
    pub foam_list_times: String,
    pub foam_clone_case: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            foam_dictionary: "foamDictionary".to_string(),
            block_mesh: "blockMesh".to_string(),
            set_fields: "setFields".to_string(),
            foam_list_times: "foamListTimes".to_string(),
            foam_clone_case: "foamCloneCase".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoamConfig {
    pub tools: ToolNames,
    /// Pass `-disableFunctionEntries` so `#include`/`#calc` stay unexpanded.
    pub disable_function_entries: bool,
}

impl Default for FoamConfig {
    fn default() -> Self {
        Self {
            tools: ToolNames::default(),
            disable_function_entries: true,
        }
    }
}

impl FoamConfig {
    pub fn load_yaml(path: &Path) -> CaseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_yaml(&self, path: &Path) -> CaseResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Installation directory of a sourced OpenFOAM environment, if any.
    pub fn installation() -> Option<String> {
        INSTALLATION_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
    }
}

/// Everything a case needs to reach the outside world.
#[derive(Clone)]
pub struct Toolchain {
    pub tool: Arc<dyn DictionaryTool>,
    pub runner: Arc<dyn CommandRunner>,
    pub config: FoamConfig,
}

impl Toolchain {
    pub fn new(
        tool: Arc<dyn DictionaryTool>,
        runner: Arc<dyn CommandRunner>,
        config: FoamConfig,
    ) -> Self {
        Self {
            tool,
            runner,
            config,
        }
    }

    /// Real processes: `foamDictionary` and friends from `PATH`.
    pub fn system(config: FoamConfig) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);
        let tool = FoamDictionary::new(runner.clone())
            .with_program(&config.tools.foam_dictionary)
            .with_function_entries_disabled(config.disable_function_entries);
        Self::new(Arc::new(tool), runner, config)
    }
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain")
            .field("tool", &self.tool.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
