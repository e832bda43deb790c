use crate::app::command_support::load_orchestrator;
use crate::runtime::{
    spawn_activity_poller, ActivityEvent, ActivityPollerContext, RuntimeError,
};
use crate::shared::time::format_timestamp;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_WATCH_SECS: u64 = 30;

pub fn cmd_watch(args: &[String]) -> Result<String, String> {
    let usage = "watch <path> [seconds]";
    let dir = args
        .first()
        .map(PathBuf::from)
        .ok_or_else(|| format!("usage: {usage}"))?;
    let seconds = match args.get(1) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| format!("invalid duration `{raw}`; usage: {usage}"))?,
        None => DEFAULT_WATCH_SECS,
    };

    let mut entries: Vec<(String, PathBuf)> = fs::read_dir(&dir)
        .map_err(|e| format!("failed to list {}: {e}", dir.display()))?
        .flatten()
        .map(|entry| (entry.file_name().to_string_lossy().to_string(), entry.path()))
        .collect();
    entries.sort();
    let tracked = entries.len();

    let orchestrator = load_orchestrator()?;
    let tracker = Arc::new(orchestrator.activity_tracker());
    tracker.replace(entries);

    let stop = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();
    let handle = spawn_activity_poller(ActivityPollerContext {
        tracker,
        interval: orchestrator.poll_interval(),
        stop: Arc::clone(&stop),
        events: tx,
        paths: orchestrator.paths().clone(),
    });

    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut changes = 0usize;
    while Instant::now() < deadline {
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(ActivityEvent::Changed {
                display_name,
                modified,
                ..
            }) => {
                changes += 1;
                println!("modified: {display_name} at {}", format_timestamp(modified));
            }
            Ok(ActivityEvent::Cleared { display_name, .. }) => {
                println!("settled: {display_name}");
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    stop.store(true, Ordering::Relaxed);
    handle.join().map_err(|_| {
        RuntimeError::WorkerPanicked {
            worker: "activity_poller".to_string(),
        }
        .to_string()
    })?;
    Ok(format!("tracked={tracked}\nchanges={changes}"))
}
