use crate::classify::{CatalogSnapshot, GameCandidate};
use crate::config::{load_settings_from, ConfigError, Settings};
use crate::orchestrator::Orchestrator;
use crate::process::{ExecutionEvent, ExecutionHandle, ExecutionRecord};
use crate::runtime::{bootstrap_state_root, default_state_root_path, StatePaths};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn ensure_runtime_root() -> Result<StatePaths, String> {
    let root = default_state_root_path().map_err(|e| e.to_string())?;
    let paths = StatePaths::new(root);
    bootstrap_state_root(&paths).map_err(|e| e.to_string())?;
    Ok(paths)
}

pub fn load_settings(paths: &StatePaths) -> Result<Settings, String> {
    load_settings_from(&paths.settings_file()).map_err(map_config_err)
}

pub fn load_orchestrator() -> Result<Orchestrator, String> {
    let paths = ensure_runtime_root()?;
    let settings = load_settings(&paths)?;
    Ok(Orchestrator::new(settings, paths))
}

pub fn parse_index(raw: Option<&String>, usage: &str) -> Result<usize, String> {
    let raw = raw.ok_or_else(|| format!("usage: {usage}"))?;
    raw.parse::<usize>()
        .map_err(|_| format!("invalid index `{raw}`; usage: {usage}"))
}

/// Scans the given roots, or the configured defaults when none are given.
pub fn scan_with_roots(orchestrator: &Orchestrator, roots: &[String]) -> Arc<CatalogSnapshot> {
    let roots: Vec<PathBuf> = if roots.is_empty() {
        orchestrator.scan_roots()
    } else {
        roots.iter().map(PathBuf::from).collect()
    };
    orchestrator.scan(&roots)
}

pub fn candidate_at(snapshot: &CatalogSnapshot, index: usize) -> Result<GameCandidate, String> {
    snapshot.get(index).cloned().ok_or_else(|| {
        format!(
            "game index {index} is out of range ({} games found)",
            snapshot.len()
        )
    })
}

/// Prints output lines as they arrive and returns the final record.
pub fn stream_to_stdout(
    handle: ExecutionHandle,
    events: Receiver<ExecutionEvent>,
) -> Result<ExecutionRecord, String> {
    for event in events.iter() {
        match event {
            ExecutionEvent::Line(line) => println!("{line}"),
            ExecutionEvent::Finished { .. } => break,
        }
    }
    handle.wait().map_err(|e| e.to_string())
}

pub fn render_record(record: &ExecutionRecord) -> String {
    let exit_code = record
        .exit_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "command={}\nworking_directory={}\nlines={}\nexit_code={}",
        record.command,
        record.working_directory.display(),
        record.line_count,
        exit_code
    )
}
