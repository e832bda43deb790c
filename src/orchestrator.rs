//! Facade tying classification, command resolution, execution, the sandbox
//! and the candidate catalog to one settings value and one state root.

use crate::build::BuildPipeline;
use crate::classify::{
    scan_roots, CandidateCatalog, CatalogSnapshot, ClassificationResult, Classifier,
    GameCandidate, WorkingState,
};
use crate::config::{default_game_scan_roots, Settings};
use crate::launch::{plan_launch, LaunchError, LaunchPlan};
use crate::process::{ExecutionHandle, OutputSink, ProcessRunner, ResolvedCommand, ShellSpec};
use crate::resolver::{commands_for, RunCommand, Selection};
use crate::runtime::{append_runtime_log, ActivityTracker, RuntimeEvent, StatePaths};
use crate::sandbox::{Sandbox, SandboxEntry, SandboxError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Forwards everything to `inner` and records the outcome in the runtime log.
pub struct LoggingSink<S> {
    inner: S,
    paths: StatePaths,
    command: String,
}

impl<S: OutputSink> OutputSink for LoggingSink<S> {
    fn line(&mut self, line: &str) {
        self.inner.line(line);
    }

    fn finished(&mut self, exit_code: Option<i32>) {
        append_runtime_log(
            &self.paths,
            &RuntimeEvent::ProcessFinished {
                command: self.command.clone(),
                exit_code,
            },
        );
        self.inner.finished(exit_code);
    }
}

pub struct Orchestrator {
    settings: Settings,
    paths: StatePaths,
    classifier: Classifier,
    runner: ProcessRunner,
    pipeline: BuildPipeline,
    sandbox: Sandbox,
    catalog: CandidateCatalog,
}

impl Orchestrator {
    pub fn new(settings: Settings, paths: StatePaths) -> Self {
        let sandbox_root = settings.resolve_sandbox_root(&paths.root);
        Self {
            classifier: Classifier::new(&settings.classify),
            runner: ProcessRunner::new(ShellSpec::from_settings(settings.shell.as_ref())),
            pipeline: BuildPipeline::new(settings.build.clone()),
            sandbox: Sandbox::new(sandbox_root),
            catalog: CandidateCatalog::new(),
            settings,
            paths,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paths(&self) -> &StatePaths {
        &self.paths
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    pub fn classify(&self, dir: &Path) -> ClassificationResult {
        self.classifier.classify(dir)
    }

    pub fn resolve_project(&self, current: &Path, selected: Option<&Path>) -> ClassificationResult {
        self.classifier.resolve_project(current, selected)
    }

    pub fn commands_for(&self, classification: &ClassificationResult) -> RunCommand {
        commands_for(classification.kind())
    }

    fn logged<S>(&self, command: &str, cwd: &Path, sink: S) -> LoggingSink<S> {
        append_runtime_log(
            &self.paths,
            &RuntimeEvent::ProcessStarted {
                command: command.to_string(),
                working_directory: cwd.to_path_buf(),
            },
        );
        LoggingSink {
            inner: sink,
            paths: self.paths.clone(),
            command: command.to_string(),
        }
    }

    pub fn run<S>(&self, line: &str, cwd: &Path, sink: S) -> ExecutionHandle
    where
        S: OutputSink + Send + 'static,
    {
        let sink = self.logged(line, cwd, sink);
        self.runner.run(line, cwd, sink)
    }

    pub fn run_command<S>(&self, command: ResolvedCommand, cwd: &Path, sink: S) -> ExecutionHandle
    where
        S: OutputSink + Send + 'static,
    {
        let sink = self.logged(&command.command_form(), cwd, sink);
        self.runner.run_command(command, cwd, sink)
    }

    pub fn build_and_run<S>(&self, root: &Path, run_after_build: bool, sink: S) -> ExecutionHandle
    where
        S: OutputSink + Send + 'static,
    {
        append_runtime_log(
            &self.paths,
            &RuntimeEvent::BuildStarted {
                root: root.to_path_buf(),
                run_after_build,
            },
        );
        let label = format!("build {}", root.display());
        let sink = LoggingSink {
            inner: sink,
            paths: self.paths.clone(),
            command: label,
        };
        self.pipeline.build_and_run(root, run_after_build, sink)
    }

    /// Starts whatever the caller picked from a `RunCommand` menu. A
    /// cancelled selection starts nothing.
    pub fn execute_selection<S>(
        &self,
        selection: Selection,
        project_root: &Path,
        sink: S,
    ) -> Option<ExecutionHandle>
    where
        S: OutputSink + Send + 'static,
    {
        match selection {
            Selection::Shell(line) => Some(self.run(&line, project_root, sink)),
            Selection::BuildPipeline { run_after_build } => {
                Some(self.build_and_run(project_root, run_after_build, sink))
            }
            Selection::Cancelled => None,
        }
    }

    pub fn scan_roots(&self) -> Vec<PathBuf> {
        if self.settings.scan.roots.is_empty() {
            return default_game_scan_roots().unwrap_or_default();
        }
        self.settings.scan.roots.clone()
    }

    /// Rescans `roots` and publishes the result as the current snapshot. The
    /// state root and the sandbox are never scanned.
    pub fn scan(&self, roots: &[PathBuf]) -> Arc<CatalogSnapshot> {
        let excluded = [self.paths.root.clone(), self.sandbox.root().to_path_buf()];
        let found = scan_roots(
            roots,
            &self.settings.scan,
            &self.settings.classify,
            &excluded,
        );
        let snapshot = self.catalog.publish(found);
        append_runtime_log(
            &self.paths,
            &RuntimeEvent::ScanCompleted {
                roots: roots.len(),
                candidates: snapshot.len(),
                generation: snapshot.generation,
            },
        );
        snapshot
    }

    pub fn verify(&self, source_path: &Path) -> Option<WorkingState> {
        self.catalog.verify(source_path)
    }

    pub fn materialize(&self, candidate: &GameCandidate) -> Result<SandboxEntry, SandboxError> {
        match self.sandbox.materialize(candidate) {
            Ok(entry) => {
                append_runtime_log(
                    &self.paths,
                    &RuntimeEvent::SandboxMaterialized {
                        source_path: candidate.source_path.clone(),
                        sandbox_dir: entry.sandbox_dir.clone(),
                    },
                );
                Ok(entry)
            }
            Err(err) => {
                append_runtime_log(
                    &self.paths,
                    &RuntimeEvent::SandboxFailed {
                        source_path: candidate.source_path.clone(),
                        error: err.to_string(),
                    },
                );
                Err(err)
            }
        }
    }

    /// Copies the candidate into the sandbox and starts the copy. Nothing is
    /// spawned when materialization or planning fails.
    pub fn launch_game<S>(
        &self,
        candidate: &GameCandidate,
        sink: S,
    ) -> Result<(SandboxEntry, ExecutionHandle), LaunchError>
    where
        S: OutputSink + Send + 'static,
    {
        let entry = self.materialize(candidate)?;
        let handle = match plan_launch(candidate.kind, &entry.launch_path)? {
            LaunchPlan::Command {
                command,
                working_directory,
            } => self.run_command(command, &working_directory, sink),
            LaunchPlan::BuildPipeline { root } => self.build_and_run(&root, true, sink),
        };
        Ok((entry, handle))
    }

    pub fn activity_tracker(&self) -> ActivityTracker {
        ActivityTracker::new(Duration::from_millis(self.settings.activity.flag_clear_ms))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.settings.activity.poll_interval_ms)
    }
}
