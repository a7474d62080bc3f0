//! Shared fixtures: scratch case directories and a scripted command runner.

#![allow(dead_code)]

use fc_case::{FoamConfig, Toolchain};
use fc_core::{CommandOutput, CommandRunner, CoreResult, Invocation};
use fc_dict::MemoryDictionary;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Fresh, empty directory for one test.
pub fn scratch(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("fc_case_tests").join(test);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "").unwrap();
}

/// Lay out the lid-driven cavity tutorial under `root` and seed its
/// dictionaries into `tool`.
pub fn cavity(root: &Path, tool: &MemoryDictionary) {
    let p = root.join("0/p");
    let u = root.join("0/U");
    let transport = root.join("constant/transportProperties");
    let control = root.join("system/controlDict");
    let fv_solution = root.join("system/fvSolution");
    let fv_schemes = root.join("system/fvSchemes");
    for file in [&p, &u, &transport, &control, &fv_solution, &fv_schemes] {
        touch(file);
        tool.add_file(file);
    }

    tool.seed(&p, "FoamFile.class", "volScalarField");
    tool.seed(&p, "dimensions", "[0 2 -2 0 0 0 0]");
    tool.seed(&p, "internalField", "uniform 0");
    for patch in ["movingWall", "fixedWalls"] {
        tool.seed(&p, &format!("boundaryField.{patch}.type"), "zeroGradient");
    }
    tool.seed(&p, "boundaryField.frontAndBack.type", "empty");

    tool.seed(&u, "FoamFile.class", "volVectorField");
    tool.seed(&u, "dimensions", "[0 1 -1 0 0 0 0]");
    tool.seed(&u, "internalField", "uniform (0 0 0)");
    tool.seed(&u, "boundaryField.movingWall.type", "fixedValue");
    tool.seed(&u, "boundaryField.movingWall.value", "uniform (1 0 0)");
    tool.seed(&u, "boundaryField.fixedWalls.type", "noSlip");
    tool.seed(&u, "boundaryField.frontAndBack.type", "empty");

    tool.seed(&transport, "FoamFile.class", "dictionary");
    tool.seed(&transport, "nu", "[0 2 -1 0 0 0 0] 0.01");

    tool.seed(&control, "FoamFile.class", "dictionary");
    tool.seed(&control, "application", "icoFoam");
    tool.seed(&control, "startFrom", "startTime");
    tool.seed(&control, "stopAt", "endTime");
    tool.seed(&control, "endTime", "0.5");
    tool.seed(&control, "deltaT", "0.005");

    tool.seed(&fv_solution, "solvers.p.solver", "PCG");
    tool.seed(&fv_solution, "solvers.p.tolerance", "1e-06");
    tool.seed(&fv_solution, "PISO.nCorrectors", "2");

    tool.seed(&fv_schemes, "ddtSchemes.default", "Euler");
}

type Responder = dyn Fn(&Invocation) -> CommandOutput + Send + Sync;

/// Records every invocation and answers with a canned response.
pub struct ScriptedRunner {
    calls: Mutex<Vec<Invocation>>,
    respond: Box<Responder>,
}

impl ScriptedRunner {
    pub fn new(respond: impl Fn(&Invocation) -> CommandOutput + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Every command succeeds silently.
    pub fn ok() -> Self {
        Self::new(|inv| output(inv, 0, "", ""))
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> CoreResult<CommandOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        Ok((self.respond)(invocation))
    }
}

pub fn output(inv: &Invocation, status: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        command: inv.command_line(),
        status: Some(status),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

pub fn toolchain(tool: &Arc<MemoryDictionary>, runner: &Arc<ScriptedRunner>) -> Toolchain {
    Toolchain::new(tool.clone(), runner.clone(), FoamConfig::default())
}

/// Recursive copy, standing in for `foamCloneCase`.
pub fn copy_tree(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}
