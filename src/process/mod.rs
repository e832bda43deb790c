pub mod runner;
pub mod shell;

use std::path::PathBuf;
use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

pub use runner::ProcessRunner;
pub use shell::ShellSpec;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("execution of `{description}` panicked")]
    Panicked { description: String },
}

/// Program and argv, already split; nothing is re-parsed by a shell unless
/// the program itself is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ResolvedCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn command_form(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// Consumer of an execution's merged output.
pub trait OutputSink {
    fn line(&mut self, line: &str);
    fn finished(&mut self, exit_code: Option<i32>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEvent {
    Line(String),
    Finished { exit_code: Option<i32> },
}

impl OutputSink for Sender<ExecutionEvent> {
    fn line(&mut self, line: &str) {
        let _ = self.send(ExecutionEvent::Line(line.to_string()));
    }

    fn finished(&mut self, exit_code: Option<i32>) {
        let _ = self.send(ExecutionEvent::Finished { exit_code });
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn line(&mut self, line: &str) {
        (**self).line(line);
    }

    fn finished(&mut self, exit_code: Option<i32>) {
        (**self).finished(exit_code);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub command: String,
    pub working_directory: PathBuf,
    pub line_count: usize,
    pub exit_code: Option<i32>,
}

/// Shared between an execution thread and its handle so the handle can kill
/// whichever child is currently running.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChildSlot {
    child: Arc<Mutex<Option<Child>>>,
    killed: Arc<AtomicBool>,
}

impl ChildSlot {
    pub(crate) fn install(&self, child: Child) {
        *self.child.lock().unwrap_or_else(|err| err.into_inner()) = Some(child);
    }

    pub(crate) fn with_child<T>(&self, f: impl FnOnce(&mut Child) -> T) -> Option<T> {
        let mut guard = self.child.lock().unwrap_or_else(|err| err.into_inner());
        guard.as_mut().map(f)
    }

    pub(crate) fn clear(&self) {
        self.child.lock().unwrap_or_else(|err| err.into_inner()).take();
    }

    pub(crate) fn was_killed(&self) -> bool {
        self.killed.load(Ordering::Relaxed)
    }

    fn kill(&self) -> bool {
        self.killed.store(true, Ordering::Relaxed);
        self.with_child(terminate).unwrap_or(false)
    }
}

/// Kills the child's whole process group so commands the shell forked
/// (lists, pipelines) die with it and release the output pipes.
#[cfg(unix)]
pub(crate) fn terminate(child: &mut Child) -> bool {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(pgid) = i32::try_from(child.id()) else {
        return child.kill().is_ok();
    };
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        Ok(()) => true,
        Err(_) => child.kill().is_ok(),
    }
}

#[cfg(not(unix))]
pub(crate) fn terminate(child: &mut Child) -> bool {
    child.kill().is_ok()
}

struct CountingSink<'a> {
    inner: &'a mut dyn OutputSink,
    count: usize,
}

impl OutputSink for CountingSink<'_> {
    fn line(&mut self, line: &str) {
        self.count += 1;
        self.inner.line(line);
    }

    fn finished(&mut self, exit_code: Option<i32>) {
        self.inner.finished(exit_code);
    }
}

#[derive(Debug)]
pub struct ExecutionHandle {
    command: String,
    slot: ChildSlot,
    join: JoinHandle<ExecutionRecord>,
}

impl ExecutionHandle {
    /// Runs `body` on a background thread. Whatever exit code it returns is
    /// reported to the sink once the body is done.
    pub(crate) fn spawn<S, F>(
        command: String,
        working_directory: PathBuf,
        mut sink: S,
        body: F,
    ) -> Self
    where
        S: OutputSink + Send + 'static,
        F: FnOnce(&ChildSlot, &mut dyn OutputSink) -> Option<i32> + Send + 'static,
    {
        let slot = ChildSlot::default();
        let join = thread::spawn({
            let slot = slot.clone();
            let command = command.clone();
            move || {
                let mut counting = CountingSink {
                    inner: &mut sink,
                    count: 0,
                };
                let exit_code = body(&slot, &mut counting);
                let line_count = counting.count;
                sink.finished(exit_code);
                ExecutionRecord {
                    command,
                    working_directory,
                    line_count,
                    exit_code,
                }
            }
        });
        Self {
            command,
            slot,
            join,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn pid(&self) -> Option<u32> {
        self.slot.with_child(|child| child.id())
    }

    /// Terminates the running child, if any. Later steps of a multi-step
    /// execution are skipped.
    pub fn kill(&self) -> bool {
        self.slot.kill()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub fn wait(self) -> Result<ExecutionRecord, ProcessError> {
        let command = self.command;
        self.join
            .join()
            .map_err(|_| ProcessError::Panicked { description: command })
    }
}
