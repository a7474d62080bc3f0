mod common;

use common::*;
use fc_case::*;
use fc_dict::MemoryDictionary;
use std::sync::Arc;

fn cavity_with(
    test: &str,
    runner: ScriptedRunner,
) -> (Arc<MemoryDictionary>, Arc<ScriptedRunner>, Case) {
    let root = scratch(test);
    let tool = Arc::new(MemoryDictionary::new());
    cavity(&root, &tool);
    let runner = Arc::new(runner);
    let case = Case::open(&root, toolchain(&tool, &runner)).unwrap();
    (tool, runner, case)
}

fn times_runner(stdout: &'static str) -> ScriptedRunner {
    ScriptedRunner::new(move |inv| output(inv, 0, stdout, ""))
}

#[test]
fn block_mesh_runs_in_case_directory() {
    let (_tool, runner, case) = cavity_with("block_mesh_ok", ScriptedRunner::ok());
    case.block_mesh().unwrap();
    case.set_fields().unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program, "blockMesh");
    assert_eq!(calls[1].program, "setFields");
    for call in &calls {
        assert_eq!(call.cwd.as_deref(), Some(case.path()));
        assert!(call.capture_stdout);
    }
}

#[test]
fn mesh_failure_reports_both_streams() {
    let runner = ScriptedRunner::new(|inv| {
        output(inv, 1, "Creating block mesh\n", "FOAM FATAL ERROR: no blockMeshDict\n")
    });
    let (_tool, _runner, case) = cavity_with("block_mesh_fails", runner);

    match case.block_mesh().unwrap_err() {
        CaseError::Command { command, diagnostic } => {
            assert_eq!(command, "blockMesh");
            assert!(diagnostic.contains("Creating block mesh"));
            assert!(diagnostic.contains("no blockMeshDict"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn application_comes_from_control_dict() {
    let (tool, runner, mut case) = cavity_with("run_application", ScriptedRunner::ok());
    case.run_application().unwrap();

    case.system_mut()
        .control_dict_mut()
        .set("application", "pimpleFoam")
        .unwrap();
    case.run_application().unwrap();

    let calls = runner.calls();
    assert_eq!(calls[0].program, "icoFoam");
    assert_eq!(calls[1].program, "pimpleFoam");
    assert!(!calls[0].capture_stdout);
    assert!(tool.query_count() > 0);
}

#[test]
fn solver_failure_reports_stderr() {
    let runner = ScriptedRunner::new(|inv| output(inv, 2, "", "Floating point exception\n"));
    let (_tool, _runner, case) = cavity_with("run_application_fails", runner);
    let err = case.run_application().unwrap_err();
    assert!(matches!(
        err,
        CaseError::Command { ref command, ref diagnostic }
            if command == "icoFoam" && diagnostic == "Floating point exception"
    ));
}

#[test]
fn times_are_sorted_numerically() {
    let (_tool, runner, case) =
        cavity_with("list_times", times_runner("0\n0.5\n0.1\n0.25\n"));

    assert_eq!(case.list_times().unwrap(), [0.0, 0.1, 0.25, 0.5]);
    assert_eq!(case.latest_time().unwrap(), Some(0.5));
    assert_eq!(runner.calls()[0].command_line(), "foamListTimes -withZero");
}

#[test]
fn unparsable_time_is_an_error() {
    let (_tool, _runner, case) = cavity_with("list_times_bad", times_runner("0\nlatest\n"));
    assert!(matches!(
        case.list_times(),
        Err(CaseError::InvalidTime { ref text, .. }) if text == "latest"
    ));
}

#[test]
fn finished_when_latest_time_reaches_end_time() {
    let (_tool, _runner, case) = cavity_with("finished", times_runner("0\n0.25\n0.5\n"));
    assert!(case.is_finished().unwrap());

    let (_tool, _runner, case) = cavity_with("not_finished", times_runner("0\n0.25\n"));
    assert!(!case.is_finished().unwrap());

    let (_tool, _runner, case) = cavity_with("no_times", times_runner(""));
    assert!(!case.is_finished().unwrap());
}

#[test]
fn finished_requires_end_time_control() {
    let (_tool, _runner, mut case) = cavity_with("stop_at_write_now", times_runner("0\n"));
    case.system_mut()
        .control_dict_mut()
        .set("stopAt", "writeNow")
        .unwrap();
    assert!(matches!(
        case.is_finished(),
        Err(CaseError::NotEndTimeControlled { ref stop_at }) if stop_at == "writeNow"
    ));
}

#[test]
fn remove_time_dirs_uses_rm_flag() {
    let (_tool, runner, case) = cavity_with("remove_times", ScriptedRunner::ok());
    case.remove_time_dirs().unwrap();
    assert_eq!(runner.calls()[0].command_line(), "foamListTimes -rm");
}

fn cloning_runner() -> ScriptedRunner {
    ScriptedRunner::new(|inv| {
        let from = std::path::Path::new(&inv.args[0]);
        let to = std::path::Path::new(&inv.args[1]);
        copy_tree(from, to);
        output(inv, 0, "", "")
    })
}

#[test]
fn clone_refuses_existing_destination() {
    let (_tool, runner, template) = cavity_with("clone_template_a", cloning_runner());
    let dest = scratch("clone_dest_a");

    assert!(matches!(
        Case::clone_from_template(&template, &dest, false),
        Err(CaseError::AlreadyExists { .. })
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn clone_with_overwrite_replaces_destination() {
    let (tool, runner, template) = cavity_with("clone_template_b", cloning_runner());
    let dest = scratch("clone_dest_b");
    touch(&dest.join("stale/leftover"));

    let clone = Case::clone_from_template(&template, &dest, true).unwrap();
    assert_eq!(clone.path(), dest);
    assert!(!dest.join("stale").exists());
    assert_eq!(clone.initial_state().unwrap().len(), 2);
    assert!(clone.system().contains("fvSolution"));

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "foamCloneCase");
    assert_eq!(calls[0].args, [template.path().display().to_string(), dest.display().to_string()]);
    assert!(calls[0].cwd.is_none());
    assert_eq!(tool.query_count(), 0);
}

#[test]
fn clone_overwrites_plain_file_destination() {
    let (_tool, _runner, template) = cavity_with("clone_template_c", cloning_runner());
    let dest = scratch("clone_dest_c").join("case");
    touch(&dest);

    let clone = Case::clone_from_template(&template, &dest, true).unwrap();
    assert!(clone.path().is_dir());
}

#[test]
fn clone_onto_template_is_refused_even_with_overwrite() {
    let (_tool, runner, template) = cavity_with("clone_onto_self", cloning_runner());
    let same = template.path().join("system").join("..");

    for overwrite in [false, true] {
        assert!(matches!(
            Case::clone_from_template(&template, &same, overwrite),
            Err(CaseError::CloneOntoTemplate { .. })
        ));
    }
    assert!(template.path().join("system/controlDict").is_file());
    assert!(runner.calls().is_empty());
}

#[test]
fn clone_failure_is_a_command_error() {
    let runner = ScriptedRunner::new(|inv| output(inv, 1, "", "foamCloneCase: no such case"));
    let (_tool, _runner, template) = cavity_with("clone_template_d", runner);
    let dest = scratch("clone_dest_d").join("copy");
    assert!(matches!(
        Case::clone_from_template(&template, &dest, false),
        Err(CaseError::Command { .. })
    ));
}
