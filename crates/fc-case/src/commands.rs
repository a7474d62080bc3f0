//! Case-level operations that run solver-suite tools.
//!
//! Each operation is one blocking process call with the case directory as the
//! working directory. A non-zero exit becomes [`CaseError::Command`]; nothing
//! is retried.

use crate::case::Case;
use crate::error::{CaseError, CaseResult};
use fc_core::{CommandOutput, Invocation};
use std::path::Path;

/// Relative tolerance when comparing `endTime` with the latest time directory.
pub const END_TIME_REL_TOL: f64 = 1e-9;

impl Case {
    /// Generate the mesh with `blockMesh`.
    pub fn block_mesh(&self) -> CaseResult<()> {
        let program = self.toolchain().config.tools.block_mesh.clone();
        self.run_verbose(Invocation::new(program))?;
        Ok(())
    }

    /// Initialise fields from `system/setFieldsDict` with `setFields`.
    pub fn set_fields(&self) -> CaseResult<()> {
        let program = self.toolchain().config.tools.set_fields.clone();
        self.run_verbose(Invocation::new(program))?;
        Ok(())
    }

    /// Run the solver named by `controlDict.application`.
    ///
    /// Solver logs can be very large, so stdout is discarded; failures report
    /// stderr only.
    pub fn run_application(&self) -> CaseResult<()> {
        let application = self.control_value("application")?;
        let output = self.run(Invocation::new(application).discard_stdout())?;
        check(&output, output.stderr.trim().to_string())?;
        Ok(())
    }

    /// Times of all time directories (including `0`), ascending.
    pub fn list_times(&self) -> CaseResult<Vec<f64>> {
        let program = self.toolchain().config.tools.foam_list_times.clone();
        let output = self.run(Invocation::new(program).arg("-withZero"))?;
        check(&output, output.stderr.trim().to_string())?;

        let mut times = output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.parse::<f64>().map_err(|_| CaseError::InvalidTime {
                    text: line.to_string(),
                    command: output.command.clone(),
                })
            })
            .collect::<CaseResult<Vec<_>>>()?;
        times.sort_by(f64::total_cmp);
        Ok(times)
    }

    pub fn latest_time(&self) -> CaseResult<Option<f64>> {
        Ok(self.list_times()?.last().copied())
    }

    /// Delete every time directory except the initial state.
    pub fn remove_time_dirs(&self) -> CaseResult<()> {
        let program = self.toolchain().config.tools.foam_list_times.clone();
        let output = self.run(Invocation::new(program).arg("-rm"))?;
        check(&output, output.stderr.trim().to_string())?;
        Ok(())
    }

    /// Whether the latest time directory matches `controlDict.endTime`.
    ///
    /// Only meaningful for cases with `stopAt endTime`; other stop controls are
    /// an error. A case without time directories is not finished.
    pub fn is_finished(&self) -> CaseResult<bool> {
        let stop_at = self.control_value("stopAt")?;
        if stop_at != "endTime" {
            return Err(CaseError::NotEndTimeControlled { stop_at });
        }

        let end_text = self.control_value("endTime")?;
        let end_time: f64 = end_text.parse().map_err(|_| CaseError::UnexpectedValue {
            entry: "endTime".to_string(),
            value: end_text.clone(),
        })?;

        Ok(self
            .latest_time()?
            .is_some_and(|latest| is_close(end_time, latest)))
    }

    /// Copy `template` to `destination` with `foamCloneCase` and open the copy.
    ///
    /// An existing destination is an error unless `overwrite` is set, in which
    /// case it is removed (recursively for a directory) first. A destination
    /// that is the template itself is always refused.
    pub fn clone_from_template(
        template: &Case,
        destination: impl AsRef<Path>,
        overwrite: bool,
    ) -> CaseResult<Case> {
        let destination = std::path::absolute(destination.as_ref())?;

        if destination.exists() {
            if std::fs::canonicalize(&destination)? == std::fs::canonicalize(template.path())? {
                return Err(CaseError::CloneOntoTemplate { path: destination });
            }
            if !overwrite {
                return Err(CaseError::AlreadyExists { path: destination });
            }
            if destination.is_dir() {
                std::fs::remove_dir_all(&destination)?;
            } else {
                std::fs::remove_file(&destination)?;
            }
            tracing::debug!(path = %destination.display(), "removed existing destination");
        }

        let toolchain = template.toolchain().clone();
        let invocation = Invocation::new(&toolchain.config.tools.foam_clone_case)
            .arg(template.path().display().to_string())
            .arg(destination.display().to_string());
        let output = toolchain.runner.run(&invocation)?;
        check(&output, output.stderr.trim().to_string())?;
        tracing::info!(command = %output.command, "finished successfully");

        Case::open(destination, toolchain)
    }

    fn control_value(&self, entry: &str) -> CaseResult<String> {
        Ok(self.system().control_dict().value(entry)?)
    }

    fn run(&self, invocation: Invocation) -> CaseResult<CommandOutput> {
        let invocation = invocation.current_dir(self.path());
        let output = self.toolchain().runner.run(&invocation)?;
        if output.success() {
            tracing::info!(command = %output.command, case = %self.name(), "finished successfully");
        }
        Ok(output)
    }

    /// Run a mesh/field utility; failures report both output streams.
    fn run_verbose(&self, invocation: Invocation) -> CaseResult<CommandOutput> {
        let output = self.run(invocation)?;
        let diagnostic = [output.stdout.trim(), output.stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        check(&output, diagnostic)?;
        Ok(output)
    }
}

fn check(output: &CommandOutput, diagnostic: String) -> CaseResult<()> {
    if output.success() {
        Ok(())
    } else {
        Err(CaseError::Command {
            command: output.command.clone(),
            diagnostic,
        })
    }
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= END_TIME_REL_TOL * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closeness_is_relative() {
        assert!(is_close(0.5, 0.5));
        assert!(is_close(1000.0, 1000.0 + 1e-7));
        assert!(!is_close(0.5, 0.495));
        assert!(is_close(0.0, 0.0));
    }
}
