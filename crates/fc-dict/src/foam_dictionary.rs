//! `foamDictionary` backend.

use crate::error::DictResult;
use crate::query::{DictionaryTool, Query};
use fc_core::{CommandOutput, CommandRunner, Invocation, SystemRunner};
use std::sync::Arc;

pub const DEFAULT_PROGRAM: &str = "foamDictionary";

/// Answers queries by running the solver suite's own `foamDictionary`.
///
/// The tool runs with its working directory set to the file's parent, so
/// relative `#include`s inside the dictionary resolve as the solver sees them.
#[derive(Clone)]
pub struct FoamDictionary {
    runner: Arc<dyn CommandRunner>,
    program: String,
    disable_function_entries: bool,
}

impl FoamDictionary {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: DEFAULT_PROGRAM.to_string(),
            disable_function_entries: true,
        }
    }

    /// Use a different executable name or path.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Toggle `-disableFunctionEntries` (keeps `#include`/`#calc` unexpanded).
    pub fn with_function_entries_disabled(mut self, disabled: bool) -> Self {
        self.disable_function_entries = disabled;
        self
    }

    pub fn invocation(&self, query: &Query) -> Invocation {
        let mut invocation = Invocation::new(&self.program).args(query.args());
        if self.disable_function_entries {
            invocation = invocation.arg("-disableFunctionEntries");
        }
        if let Some(parent) = query.file.parent() {
            invocation = invocation.current_dir(parent);
        }
        invocation
    }
}

impl Default for FoamDictionary {
    fn default() -> Self {
        Self::new(Arc::new(SystemRunner))
    }
}

impl DictionaryTool for FoamDictionary {
    fn name(&self) -> &str {
        &self.program
    }

    fn query(&self, query: &Query) -> DictResult<CommandOutput> {
        Ok(self.runner.run(&self.invocation(query))?)
    }
}
