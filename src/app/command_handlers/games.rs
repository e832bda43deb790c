use crate::app::command_support::{
    candidate_at, load_orchestrator, parse_index, render_record, scan_with_roots,
    stream_to_stdout,
};
use crate::classify::describe;
use std::sync::mpsc;

pub fn cmd_scan(args: &[String]) -> Result<String, String> {
    let orchestrator = load_orchestrator()?;
    let snapshot = scan_with_roots(&orchestrator, args);
    let mut lines = vec![format!("games={}", snapshot.len())];
    lines.extend(snapshot.candidates.iter().enumerate().map(|(index, game)| {
        format!(
            "{index}: {} [{}] {}",
            game.name,
            game.kind.label(),
            game.source_path.display()
        )
    }));
    Ok(lines.join("\n"))
}

pub fn cmd_launch(args: &[String]) -> Result<String, String> {
    let index = parse_index(args.first(), "launch <index> [roots...]")?;
    let orchestrator = load_orchestrator()?;
    let snapshot = scan_with_roots(&orchestrator, &args[1..]);
    let candidate = candidate_at(&snapshot, index)?;

    let (tx, rx) = mpsc::channel();
    let (entry, handle) = orchestrator
        .launch_game(&candidate, tx)
        .map_err(|e| e.to_string())?;
    println!("sandbox={}", entry.sandbox_dir.display());
    let record = stream_to_stdout(handle, rx)?;
    Ok(render_record(&record))
}

pub fn cmd_verify(args: &[String]) -> Result<String, String> {
    let index = parse_index(args.first(), "verify <index> [roots...]")?;
    let orchestrator = load_orchestrator()?;
    let snapshot = scan_with_roots(&orchestrator, &args[1..]);
    let candidate = candidate_at(&snapshot, index)?;
    let state = orchestrator
        .verify(&candidate.source_path)
        .ok_or_else(|| format!("{} is no longer listed", candidate.source_path.display()))?;
    Ok(format!("game={}\nstatus={}", candidate.name, state.as_str()))
}

pub fn cmd_info(args: &[String]) -> Result<String, String> {
    let index = parse_index(args.first(), "info <index> [roots...]")?;
    let orchestrator = load_orchestrator()?;
    let snapshot = scan_with_roots(&orchestrator, &args[1..]);
    let candidate = candidate_at(&snapshot, index)?;
    Ok(describe(&candidate).join("\n"))
}

pub fn cmd_sandbox(args: &[String]) -> Result<String, String> {
    let orchestrator = load_orchestrator()?;
    let sandbox = orchestrator.sandbox();
    match args.first().map(String::as_str) {
        None | Some("list") => {
            let entries = sandbox.entries().map_err(|e| e.to_string())?;
            let mut lines = vec![
                format!("root={}", sandbox.root().display()),
                format!("entries={}", entries.len()),
            ];
            lines.extend(entries);
            Ok(lines.join("\n"))
        }
        Some("purge") => {
            let name = args
                .get(1..)
                .map(|rest| rest.join(" "))
                .filter(|name| !name.trim().is_empty())
                .ok_or_else(|| "usage: sandbox purge <name>".to_string())?;
            let removed = sandbox.purge(&name).map_err(|e| e.to_string())?;
            Ok(format!("purged={removed}"))
        }
        Some(other) => Err(format!("unknown sandbox subcommand `{other}`")),
    }
}
