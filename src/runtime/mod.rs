pub mod activity;
pub mod logging;
pub mod state_paths;
pub(crate) mod worker_primitives;
pub mod workers;

pub use crate::shared::errors::RuntimeError;
pub(crate) use crate::shared::time::now_secs;
pub use activity::{ActivityEvent, ActivityTracker, TrackedEntry};
pub use logging::{append_runtime_log, LogLevel, RuntimeEvent};
pub use state_paths::{
    bootstrap_state_root, default_state_root_path, StatePaths, DEFAULT_STATE_ROOT_DIR,
};
pub use workers::{
    run_activity_poller, spawn_activity_poller, spawn_scan, ActivityPollerContext,
};
