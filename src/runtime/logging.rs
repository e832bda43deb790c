//! JSON-lines runtime log. Every record carries `timestamp`, `level`, `event`
//! and the event's own fields flattened alongside them. Writing is best effort:
//! a failed append never fails the operation being logged.

use super::StatePaths;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum RuntimeEvent {
    #[serde(rename = "scan.completed")]
    ScanCompleted {
        roots: usize,
        candidates: usize,
        generation: u64,
    },
    #[serde(rename = "sandbox.materialized")]
    SandboxMaterialized {
        source_path: PathBuf,
        sandbox_dir: PathBuf,
    },
    #[serde(rename = "sandbox.failed")]
    SandboxFailed { source_path: PathBuf, error: String },
    #[serde(rename = "process.started")]
    ProcessStarted {
        command: String,
        working_directory: PathBuf,
    },
    #[serde(rename = "process.finished")]
    ProcessFinished {
        command: String,
        exit_code: Option<i32>,
    },
    #[serde(rename = "build.started")]
    BuildStarted { root: PathBuf, run_after_build: bool },
    #[serde(rename = "activity.changed")]
    ActivityChanged { display_name: String, path: PathBuf },
}

impl RuntimeEvent {
    pub fn level(&self) -> LogLevel {
        match self {
            Self::SandboxFailed { .. } => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

#[derive(Serialize)]
struct LogRecord<'a> {
    timestamp: i64,
    level: LogLevel,
    #[serde(flatten)]
    event: &'a RuntimeEvent,
}

pub fn append_runtime_log(paths: &StatePaths, event: &RuntimeEvent) {
    let record = LogRecord {
        timestamp: super::now_secs(),
        level: event.level(),
        event,
    };
    let Ok(line) = serde_json::to_string(&record) else {
        return;
    };

    let path = paths.runtime_log_path();
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}
