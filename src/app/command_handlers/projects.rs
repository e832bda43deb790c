use crate::app::command_support::{
    load_orchestrator, parse_index, render_record, stream_to_stdout,
};
use crate::classify::ClassificationResult;
use crate::resolver::Selection;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

fn required_path(args: &[String], usage: &str) -> Result<PathBuf, String> {
    args.first()
        .map(PathBuf::from)
        .ok_or_else(|| format!("usage: {usage}"))
}

fn render_classification(result: &ClassificationResult) -> String {
    match result {
        ClassificationResult::NoMatch => "kind=none".to_string(),
        ClassificationResult::Project { kind, root } => format!(
            "kind={}\nname={}\nsource={}\nroot={}",
            kind.as_str(),
            kind.display_name(),
            if kind.is_descriptor_based() {
                "descriptor"
            } else {
                "bare_source"
            },
            root.display()
        ),
    }
}

pub fn cmd_classify(args: &[String]) -> Result<String, String> {
    let usage = "classify <path> [selected]";
    let current = required_path(args, usage)?;
    let selected = args.get(1).map(PathBuf::from);
    let orchestrator = load_orchestrator()?;
    let result = orchestrator.resolve_project(&current, selected.as_deref());
    Ok(render_classification(&result))
}

pub fn cmd_commands(args: &[String]) -> Result<String, String> {
    let dir = required_path(args, "commands <path>")?;
    let orchestrator = load_orchestrator()?;
    let result = orchestrator.classify(&dir);
    let menu = orchestrator.commands_for(&result);
    let mut lines = vec![render_classification(&result)];
    lines.extend(
        menu.labels()
            .into_iter()
            .enumerate()
            .map(|(index, label)| format!("{index}: {label}")),
    );
    Ok(lines.join("\n"))
}

pub fn cmd_run(args: &[String]) -> Result<String, String> {
    let usage = "run <path> <index> [custom...]";
    let dir = required_path(args, usage)?;
    let index = parse_index(args.get(1), usage)?;
    let custom = args.get(2..).map(|rest| rest.join(" "));

    let orchestrator = load_orchestrator()?;
    let result = orchestrator.classify(&dir);
    let root = result.root().map(Path::to_path_buf).unwrap_or(dir);
    let selection = orchestrator
        .commands_for(&result)
        .select(index, || custom)
        .map_err(|e| e.to_string())?;
    if selection == Selection::Cancelled {
        return Ok("cancelled".to_string());
    }

    let (tx, rx) = mpsc::channel();
    let Some(handle) = orchestrator.execute_selection(selection, &root, tx) else {
        return Ok("cancelled".to_string());
    };
    let record = stream_to_stdout(handle, rx)?;
    Ok(render_record(&record))
}

pub fn cmd_exec(args: &[String]) -> Result<String, String> {
    let usage = "exec <cwd> <command...>";
    let cwd = required_path(args, usage)?;
    let line = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();
    if line.trim().is_empty() {
        return Err(format!("usage: {usage}"));
    }

    let orchestrator = load_orchestrator()?;
    let (tx, rx) = mpsc::channel();
    let handle = orchestrator.run(&line, &cwd, tx);
    let record = stream_to_stdout(handle, rx)?;
    Ok(render_record(&record))
}

pub fn cmd_build(args: &[String]) -> Result<String, String> {
    let root = required_path(args, "build <path> [--no-run]")?;
    let run_after_build = !args.iter().skip(1).any(|arg| arg == "--no-run");

    let orchestrator = load_orchestrator()?;
    let (tx, rx) = mpsc::channel();
    let handle = orchestrator.build_and_run(&root, run_after_build, tx);
    let record = stream_to_stdout(handle, rx)?;
    Ok(render_record(&record))
}
