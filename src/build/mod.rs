//! Compile-and-run for source trees that carry no build descriptor.
//!
//! Discovery, compilation and the optional run all happen on one background
//! execution, streaming progress and tool output through the same sink.

pub mod discovery;
pub mod entry_point;

use crate::config::BuildSettings;
use crate::process::runner::stream_command;
use crate::process::{ChildSlot, ExecutionHandle, OutputSink, ResolvedCommand};
use std::path::Path;

pub use discovery::{discover_sources, SourceDiscovery};
pub use entry_point::{compile_arguments, find_entry_point, qualified_name};

fn relative_label(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

pub fn program_finished_line(exit_code: i32) -> String {
    format!("--- Program finished with exit code: {exit_code} ---")
}

#[derive(Debug, Clone, Default)]
pub struct BuildPipeline {
    settings: BuildSettings,
}

impl BuildPipeline {
    pub fn new(settings: BuildSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    pub fn discover(&self, root: &Path) -> SourceDiscovery {
        discover_sources(
            root,
            &self.settings.discovery_roots,
            &self.settings.source_extension,
        )
    }

    /// Completes with the compiler's exit code, or the program's when it ran.
    /// Nothing to build completes without an exit code and starts no process.
    pub fn build_and_run<S>(&self, root: &Path, run_after_build: bool, sink: S) -> ExecutionHandle
    where
        S: OutputSink + Send + 'static,
    {
        let settings = self.settings.clone();
        let root = root.to_path_buf();
        let action = if run_after_build {
            "compile and run"
        } else {
            "compile"
        };
        ExecutionHandle::spawn(
            format!("{action} {}", root.display()),
            root.clone(),
            sink,
            move |slot, sink| run_pipeline(&settings, &root, run_after_build, slot, sink),
        )
    }
}

fn run_pipeline(
    settings: &BuildSettings,
    root: &Path,
    run_after_build: bool,
    slot: &ChildSlot,
    sink: &mut dyn OutputSink,
) -> Option<i32> {
    let ext = &settings.source_extension;
    sink.line(&format!("Searching for .{ext} files in project..."));
    let found = discover_sources(root, &settings.discovery_roots, ext);
    for dir in &found.searched {
        sink.line(&format!("Searching in: {}", relative_label(root, dir)));
    }

    if found.is_empty() {
        sink.line(&format!(
            "No .{ext} files found in any of the searched directories."
        ));
        sink.line("Searched locations:");
        for relative in &settings.discovery_roots {
            sink.line(&format!("  - {}", relative.display()));
        }
        return None;
    }

    sink.line(&format!("Found {} .{ext} file(s):", found.files.len()));
    for file in &found.files {
        sink.line(&format!("  {}", relative_label(root, file)));
    }
    sink.line("");
    sink.line(&format!(
        "Compiling .{ext} files from: {}",
        relative_label(root, &found.base)
    ));

    let compile = ResolvedCommand::new(
        settings.compiler.clone(),
        compile_arguments(&found.base, &found.files),
    );
    let compile_code = match stream_command(&compile, &found.base, slot, sink) {
        Ok(code) => code,
        Err(err) => {
            sink.line(&format!("Error: {err}"));
            return None;
        }
    };
    if compile_code != 0 {
        sink.line(&format!("Compilation failed with exit code: {compile_code}"));
        return Some(compile_code);
    }
    sink.line("Compilation successful!");
    if !run_after_build || slot.was_killed() {
        return Some(compile_code);
    }

    sink.line("");
    let Some(entry) = find_entry_point(&found.files, &settings.entry_marker) else {
        sink.line(&format!("No main method found in any .{ext} file."));
        return Some(compile_code);
    };

    sink.line(&format!("Running {entry}..."));
    sink.line("--- Output ---");
    let run = ResolvedCommand::new(settings.launcher.clone(), ["-cp", ".", entry.as_str()]);
    match stream_command(&run, &found.base, slot, sink) {
        Ok(code) => {
            sink.line(&program_finished_line(code));
            Some(code)
        }
        Err(err) => {
            sink.line(&format!("Error: {err}"));
            None
        }
    }
}
