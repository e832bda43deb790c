use launchdeck::classify::{GameCandidate, GameKind, ProjectKind, WorkingState};
use launchdeck::config::Settings;
use launchdeck::launch::LaunchError;
use launchdeck::orchestrator::Orchestrator;
use launchdeck::process::ExecutionEvent;
use launchdeck::resolver::Selection;
use launchdeck::runtime::{bootstrap_state_root, StatePaths};
use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use tempfile::tempdir;

fn orchestrator(state_root: &Path) -> Orchestrator {
    let paths = StatePaths::new(state_root);
    bootstrap_state_root(&paths).expect("bootstrap");
    Orchestrator::new(Settings::default(), paths)
}

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, body).expect("write");
}

fn drain(rx: Receiver<ExecutionEvent>) -> Vec<String> {
    let mut lines = Vec::new();
    for event in rx.iter() {
        match event {
            ExecutionEvent::Line(line) => lines.push(line),
            ExecutionEvent::Finished { .. } => break,
        }
    }
    lines
}

#[test]
fn sandbox_defaults_to_state_root() {
    let dir = tempdir().expect("tempdir");
    let orchestrator = orchestrator(&dir.path().join("state"));
    assert_eq!(orchestrator.sandbox().root(), dir.path().join("state/sandbox"));
}

#[test]
fn scan_publishes_snapshot_and_logs() {
    let dir = tempdir().expect("tempdir");
    let games = dir.path().join("games");
    write(&games.join("snake.py"), "print('snake')");
    let orchestrator = orchestrator(&dir.path().join("state"));

    let first = orchestrator.scan(&[games.clone()]);
    let second = orchestrator.scan(&[games.clone()]);
    assert_eq!(first.candidates, second.candidates);
    assert!(second.generation > first.generation);

    let path = second.candidates[0].source_path.clone();
    assert_eq!(orchestrator.verify(&path), Some(WorkingState::Working));
    assert_eq!(
        orchestrator.catalog().snapshot().candidates[0].working_state,
        WorkingState::Working
    );

    let log = fs::read_to_string(orchestrator.paths().runtime_log_path()).expect("log");
    assert!(log.contains("scan.completed"));
}

#[test]
fn scanning_home_skips_the_state_root() {
    let home = tempdir().expect("tempdir");
    write(&home.path().join("pong.py"), "print('pong')");
    let orchestrator = orchestrator(&home.path().join(".launchdeck"));
    orchestrator
        .run("echo warmup", home.path(), mpsc::channel().0)
        .wait()
        .expect("wait");
    assert!(orchestrator.paths().runtime_log_path().exists());

    let snapshot = orchestrator.scan(&[home.path().to_path_buf()]);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.candidates[0].name, "Pong");

    let log = fs::read_to_string(orchestrator.paths().runtime_log_path()).expect("log");
    let scan_record: serde_json::Value = log
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("json"))
        .find(|record| record["event"] == "scan.completed")
        .expect("scan record");
    assert_eq!(scan_record["candidates"], 1);
    assert_eq!(scan_record["roots"], 1);
}

#[test]
fn launch_of_missing_source_fails_before_spawning() {
    let dir = tempdir().expect("tempdir");
    let orchestrator = orchestrator(&dir.path().join("state"));
    let game = GameCandidate::new(
        GameKind::PythonScript,
        dir.path().join("gone.py"),
        "Python script game",
    );

    let (tx, rx) = mpsc::channel();
    let err = orchestrator
        .launch_game(&game, tx)
        .expect_err("materialize should fail");
    assert!(matches!(err, LaunchError::Materialize(_)));
    assert!(rx.try_recv().is_err());
}

#[test]
fn cancelled_selection_starts_nothing() {
    let dir = tempdir().expect("tempdir");
    let orchestrator = orchestrator(&dir.path().join("state"));
    let (tx, _rx) = mpsc::channel();
    assert!(orchestrator
        .execute_selection(Selection::Cancelled, dir.path(), tx)
        .is_none());
}

#[test]
fn commands_follow_classification() {
    let dir = tempdir().expect("tempdir");
    write(&dir.path().join("project/go.mod"), "module x");
    let orchestrator = orchestrator(&dir.path().join("state"));
    let result = orchestrator.resolve_project(&dir.path().join("project"), None);
    assert_eq!(result.kind(), Some(ProjectKind::Go));
    assert_eq!(orchestrator.commands_for(&result).labels()[0], "go run .");
}

#[cfg(unix)]
#[test]
fn launching_a_script_runs_the_sandbox_copy() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("games/run_game.sh");
    write(&source, "echo \"running from $(basename \"$PWD\")\"\n");
    let orchestrator = orchestrator(&dir.path().join("state"));
    let game = GameCandidate::new(GameKind::ShellScript, source, "Shell script game");

    let (tx, rx) = mpsc::channel();
    let (entry, handle) = orchestrator.launch_game(&game, tx).expect("launch");
    let lines = drain(rx);

    assert_eq!(entry.sandbox_dir, dir.path().join("state/sandbox/Run_Game"));
    assert_eq!(lines[0], "running from Run_Game");
    assert_eq!(handle.wait().expect("wait").exit_code, Some(0));

    let log = fs::read_to_string(orchestrator.paths().runtime_log_path()).expect("log");
    assert!(log.contains("sandbox.materialized"));
    assert!(log.contains("process.started"));
    assert!(log.contains("process.finished"));
}

#[cfg(unix)]
#[test]
fn shell_selection_runs_in_project_root() {
    let dir = tempdir().expect("tempdir");
    let project = dir.path().join("web");
    write(&project.join("package.json"), "{}");
    let orchestrator = orchestrator(&dir.path().join("state"));

    let (tx, rx) = mpsc::channel();
    let handle = orchestrator
        .execute_selection(Selection::Shell("ls".to_string()), &project, tx)
        .expect("started");
    let lines = drain(rx);
    assert!(lines.contains(&"package.json".to_string()));
    assert_eq!(handle.wait().expect("wait").exit_code, Some(0));
}
