use super::{
    terminate, ChildSlot, ExecutionHandle, OutputSink, ProcessError, ResolvedCommand, ShellSpec,
};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub fn exit_line(exit_code: i32) -> String {
    format!("--- Process finished with exit code: {exit_code} ---")
}

#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    shell: ShellSpec,
}

impl ProcessRunner {
    pub fn new(shell: ShellSpec) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &ShellSpec {
        &self.shell
    }

    /// Runs a free-form command line through the configured shell.
    pub fn run<S>(&self, line: &str, working_directory: &Path, sink: S) -> ExecutionHandle
    where
        S: OutputSink + Send + 'static,
    {
        self.run_command(self.shell.wrap(line), working_directory, sink)
    }

    pub fn run_command<S>(
        &self,
        command: ResolvedCommand,
        working_directory: &Path,
        sink: S,
    ) -> ExecutionHandle
    where
        S: OutputSink + Send + 'static,
    {
        let cwd = working_directory.to_path_buf();
        ExecutionHandle::spawn(command.command_form(), cwd.clone(), sink, move |slot, sink| {
            match stream_command(&command, &cwd, slot, sink) {
                Ok(code) => {
                    sink.line(&exit_line(code));
                    Some(code)
                }
                Err(err) => {
                    sink.line(&format!("Error: {err}"));
                    None
                }
            }
        })
    }
}

fn pump_lines<R>(source: R, tx: Sender<String>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    while matches!(buf.last(), Some(b'\n' | b'\r')) {
                        buf.pop();
                    }
                    if tx.send(String::from_utf8_lossy(&buf).into_owned()).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Spawns one child, forwards its merged output line by line and returns the
/// exit code once both pipes have closed. Signal deaths report `-1`.
pub(crate) fn stream_command(
    command: &ResolvedCommand,
    working_directory: &Path,
    slot: &ChildSlot,
    sink: &mut dyn OutputSink,
) -> Result<i32, ProcessError> {
    let mut builder = Command::new(&command.program);
    builder
        .args(&command.args)
        .current_dir(working_directory)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        builder.process_group(0);
    }
    let mut child = builder.spawn().map_err(|source| ProcessError::Spawn {
        program: command.program.clone(),
        source,
    })?;

    let (tx, rx) = mpsc::channel();
    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(pump_lines(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(pump_lines(stderr, tx.clone()));
    }
    drop(tx);
    slot.install(child);
    // A kill that arrived before the child was installed found nothing to signal.
    if slot.was_killed() {
        slot.with_child(terminate);
    }

    for line in rx {
        sink.line(&line);
    }
    for reader in readers {
        let _ = reader.join();
    }

    let status = loop {
        match slot.with_child(|child| child.try_wait()) {
            Some(Ok(Some(status))) => break status,
            Some(Ok(None)) => thread::sleep(Duration::from_millis(10)),
            Some(Err(source)) => {
                slot.clear();
                return Err(ProcessError::Wait {
                    program: command.program.clone(),
                    source,
                });
            }
            None => {
                return Err(ProcessError::Wait {
                    program: command.program.clone(),
                    source: std::io::Error::other("child handle missing"),
                })
            }
        }
    };
    slot.clear();
    Ok(status.code().unwrap_or(-1))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::mpsc::Receiver;
    use std::time::Instant;

    struct Collect(Vec<String>);

    impl OutputSink for Collect {
        fn line(&mut self, line: &str) {
            self.0.push(line.to_string());
        }

        fn finished(&mut self, _exit_code: Option<i32>) {}
    }

    fn drain(rx: Receiver<String>) -> Vec<String> {
        rx.try_iter().collect()
    }

    #[test]
    fn pump_lines_strips_line_endings() {
        let (tx, rx) = mpsc::channel();
        pump_lines(&b"one\r\ntwo\nthree"[..], tx).join().expect("join");
        assert_eq!(drain(rx), vec!["one", "two", "three"]);
    }

    #[test]
    fn kill_before_install_still_stops_the_child() {
        let dir = tempfile::tempdir().expect("tempdir");
        let slot = ChildSlot::default();
        assert!(!slot.kill());

        let started = Instant::now();
        let mut sink = Collect(Vec::new());
        let code = stream_command(
            &ShellSpec::new("sh", "-c").wrap("echo late; sleep 30"),
            dir.path(),
            &slot,
            &mut sink,
        )
        .expect("stream");
        assert_eq!(code, -1);
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(sink.0.len() <= 1);
    }
}
