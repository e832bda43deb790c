#![cfg(unix)]

use launchdeck::build::BuildPipeline;
use launchdeck::config::BuildSettings;
use launchdeck::process::ExecutionEvent;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::mpsc;
use tempfile::tempdir;

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).expect("write script");
    let mut perms = fs::metadata(path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod");
}

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, body).expect("write");
}

/// Fake toolchain: the compiler echoes its argv and exits with `compile_exit`;
/// the launcher prints the class it was asked to run and exits 7.
fn fake_toolchain(bin: &Path, compile_exit: i32) -> BuildSettings {
    fs::create_dir_all(bin).expect("bin dir");
    let compiler = bin.join("fake-javac");
    let launcher = bin.join("fake-java");
    write_script(
        &compiler,
        &format!("#!/bin/sh\necho \"javac $*\"\nexit {compile_exit}\n"),
    );
    write_script(&launcher, "#!/bin/sh\necho \"java $*\"\nexit 7\n");
    BuildSettings {
        compiler: compiler.display().to_string(),
        launcher: launcher.display().to_string(),
        ..BuildSettings::default()
    }
}

fn run(pipeline: &BuildPipeline, root: &Path, run_after_build: bool) -> (Vec<String>, Option<i32>) {
    let (tx, rx) = mpsc::channel();
    let handle = pipeline.build_and_run(root, run_after_build, tx);
    let mut lines = Vec::new();
    let mut exit_code = None;
    for event in rx.iter() {
        match event {
            ExecutionEvent::Line(line) => lines.push(line),
            ExecutionEvent::Finished { exit_code: code } => {
                exit_code = code;
                break;
            }
        }
    }
    let record = handle.wait().expect("wait");
    assert_eq!(record.exit_code, exit_code);
    assert_eq!(record.line_count, lines.len());
    (lines, exit_code)
}

#[test]
fn nothing_to_build_never_invokes_compiler() {
    let dir = tempdir().expect("tempdir");
    let project = dir.path().join("empty");
    write(&project.join("README.md"), "docs");

    let settings = BuildSettings {
        compiler: "/definitely/not/javac".to_string(),
        ..BuildSettings::default()
    };
    let (lines, exit_code) = run(&BuildPipeline::new(settings), &project, true);

    assert_eq!(exit_code, None);
    assert!(lines.contains(&"No .java files found in any of the searched directories.".to_string()));
    assert!(!lines.iter().any(|line| line.starts_with("Error:")));
    assert!(!lines.iter().any(|line| line.starts_with("Compiling")));
}

#[test]
fn compiles_from_first_conventional_directory_and_runs_packaged_main() {
    let dir = tempdir().expect("tempdir");
    let project = dir.path().join("chess");
    write(
        &project.join("src/main/java/com/example/Board.java"),
        "package com.example;\nclass Board {}\n",
    );
    write(
        &project.join("src/main/java/com/example/Chess.java"),
        "package com.example;\n\npublic class Chess {\n    public static void main(String[] args) {}\n}\n",
    );
    let pipeline = BuildPipeline::new(fake_toolchain(&dir.path().join("bin"), 0));

    let (lines, exit_code) = run(&pipeline, &project, true);

    assert!(lines.contains(&"Found 2 .java file(s):".to_string()));
    assert!(lines.contains(&"Compiling .java files from: src".to_string()));
    assert!(lines.contains(
        &"javac -cp . -d . main/java/com/example/Board.java main/java/com/example/Chess.java"
            .to_string()
    ));
    assert!(lines.contains(&"Compilation successful!".to_string()));
    assert!(lines.contains(&"Running com.example.Chess...".to_string()));
    assert!(lines.contains(&"java -cp . com.example.Chess".to_string()));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("--- Program finished with exit code: 7 ---")
    );
    assert_eq!(exit_code, Some(7));
}

#[test]
fn compile_only_stops_after_success() {
    let dir = tempdir().expect("tempdir");
    let project = dir.path().join("hello");
    write(
        &project.join("Hello.java"),
        "public class Hello { public static void main(String[] a) {} }",
    );
    let pipeline = BuildPipeline::new(fake_toolchain(&dir.path().join("bin"), 0));

    let (lines, exit_code) = run(&pipeline, &project, false);
    assert_eq!(lines.last().map(String::as_str), Some("Compilation successful!"));
    assert!(lines.contains(&"javac -cp . -d . Hello.java".to_string()));
    assert_eq!(exit_code, Some(0));
}

#[test]
fn compile_failure_reports_exit_code_and_skips_run() {
    let dir = tempdir().expect("tempdir");
    let project = dir.path().join("broken");
    write(
        &project.join("src/Broken.java"),
        "public class Broken { public static void main(String[] a) {",
    );
    let pipeline = BuildPipeline::new(fake_toolchain(&dir.path().join("bin"), 2));

    let (lines, exit_code) = run(&pipeline, &project, true);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Compilation failed with exit code: 2")
    );
    assert!(!lines.iter().any(|line| line.starts_with("Running")));
    assert_eq!(exit_code, Some(2));
}

#[test]
fn missing_entry_point_is_reported() {
    let dir = tempdir().expect("tempdir");
    let project = dir.path().join("library");
    write(&project.join("src/Util.java"), "class Util {}");
    let pipeline = BuildPipeline::new(fake_toolchain(&dir.path().join("bin"), 0));

    let (lines, exit_code) = run(&pipeline, &project, true);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("No main method found in any .java file.")
    );
    assert_eq!(exit_code, Some(0));
}
