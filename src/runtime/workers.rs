use super::activity::{ActivityEvent, ActivityTracker};
use super::worker_primitives::sleep_with_stop;
use super::{append_runtime_log, RuntimeEvent, StatePaths};
use crate::classify::CatalogSnapshot;
use crate::orchestrator::Orchestrator;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Scans `roots` off the caller's thread and sends the published snapshot.
pub fn spawn_scan(
    orchestrator: Arc<Orchestrator>,
    roots: Vec<PathBuf>,
    events: Sender<Arc<CatalogSnapshot>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let snapshot = orchestrator.scan(&roots);
        let _ = events.send(snapshot);
    })
}

pub struct ActivityPollerContext {
    pub tracker: Arc<ActivityTracker>,
    pub interval: Duration,
    pub stop: Arc<AtomicBool>,
    pub events: Sender<ActivityEvent>,
    pub paths: StatePaths,
}

pub fn run_activity_poller(ctx: ActivityPollerContext) {
    while sleep_with_stop(&ctx.stop, ctx.interval) {
        for event in ctx.tracker.tick(Instant::now()) {
            if let ActivityEvent::Changed {
                display_name, path, ..
            } = &event
            {
                append_runtime_log(
                    &ctx.paths,
                    &RuntimeEvent::ActivityChanged {
                        display_name: display_name.clone(),
                        path: path.clone(),
                    },
                );
            }
            if ctx.events.send(event).is_err() {
                return;
            }
        }
    }
}

pub fn spawn_activity_poller(ctx: ActivityPollerContext) -> JoinHandle<()> {
    thread::spawn(move || run_activity_poller(ctx))
}
