use crate::classify::walk::extension_lowercase;
use crate::classify::{GameKind, ProjectKind};
use crate::process::ResolvedCommand;
use crate::sandbox::SandboxError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    Materialize(#[from] SandboxError),
    #[error("no launch strategy for {kind} at {path}")]
    NoStrategy { kind: String, path: String },
    #[error("no Python entry file found in {path}")]
    NoPythonEntry { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    Command {
        command: ResolvedCommand,
        working_directory: PathBuf,
    },
    BuildPipeline {
        root: PathBuf,
    },
}

const PYTHON_ENTRY_FILES: &[&str] = &["main.py", "app.py", "game.py", "run.py", "start.py"];
const PYTHON_FALLBACK_DEPTH: usize = 2;

struct FileLauncher {
    extension: &'static str,
    program: &'static str,
    args: &'static [&'static str],
}

const FILE_LAUNCHERS: &[FileLauncher] = &[
    FileLauncher {
        extension: "jar",
        program: "java",
        args: &["-jar"],
    },
    FileLauncher {
        extension: "py",
        program: "python",
        args: &[],
    },
    FileLauncher {
        extension: "js",
        program: "node",
        args: &[],
    },
    FileLauncher {
        extension: "sh",
        program: "bash",
        args: &[],
    },
    FileLauncher {
        extension: "bat",
        program: "cmd",
        args: &["/c"],
    },
];

const PROJECT_LAUNCHERS: &[(ProjectKind, &str, &[&str])] = &[
    (ProjectKind::Maven, "mvn", &["exec:java"]),
    (ProjectKind::Gradle, "./gradlew", &["run"]),
    (ProjectKind::Node, "npm", &["start"]),
    (ProjectKind::Rust, "cargo", &["run"]),
    (ProjectKind::Go, "go", &["run", "."]),
    (ProjectKind::Make, "make", &["run"]),
];

fn html_opener(file: &Path) -> ResolvedCommand {
    let file = file.display().to_string();
    if cfg!(windows) {
        ResolvedCommand::new("cmd", ["/c", "start", "", file.as_str()])
    } else if cfg!(target_os = "macos") {
        ResolvedCommand::new("open", [file])
    } else {
        ResolvedCommand::new("xdg-open", [file])
    }
}

fn file_command(file: &Path) -> ResolvedCommand {
    let extension = extension_lowercase(file);
    if extension == "html" {
        return html_opener(file);
    }
    let file_arg = file.display().to_string();
    match FILE_LAUNCHERS
        .iter()
        .find(|launcher| launcher.extension == extension)
    {
        Some(launcher) => {
            let mut args: Vec<String> = launcher.args.iter().map(|arg| arg.to_string()).collect();
            args.push(file_arg);
            ResolvedCommand::new(launcher.program, args)
        }
        None => ResolvedCommand::new(file_arg, Vec::<String>::new()),
    }
}

/// Conventional entry names first, then the first `.py` file within two levels.
pub fn find_python_entry(dir: &Path) -> Option<PathBuf> {
    if let Some(named) = PYTHON_ENTRY_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
    {
        return Some(named);
    }
    WalkDir::new(dir)
        .max_depth(PYTHON_FALLBACK_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| entry.file_type().is_file() && extension_lowercase(entry.path()) == "py")
        .map(|entry| entry.into_path())
}

fn python_plan(dir: &Path) -> Option<LaunchPlan> {
    find_python_entry(dir).map(|entry| LaunchPlan::Command {
        command: ResolvedCommand::new("python", [entry.display().to_string()]),
        working_directory: dir.to_path_buf(),
    })
}

/// How to start a materialized copy. Single files are dispatched on their
/// extension and run from their own directory; projects run from their root.
pub fn plan_launch(kind: GameKind, launch_path: &Path) -> Result<LaunchPlan, LaunchError> {
    let project = match kind {
        GameKind::Project(project) => project,
        _ => {
            let working_directory = launch_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| launch_path.to_path_buf());
            return Ok(LaunchPlan::Command {
                command: file_command(launch_path),
                working_directory,
            });
        }
    };

    match project {
        Some(ProjectKind::JavaSource) => Ok(LaunchPlan::BuildPipeline {
            root: launch_path.to_path_buf(),
        }),
        Some(ProjectKind::Python) => {
            python_plan(launch_path).ok_or_else(|| LaunchError::NoPythonEntry {
                path: launch_path.display().to_string(),
            })
        }
        Some(project) => PROJECT_LAUNCHERS
            .iter()
            .find(|(candidate, _, _)| *candidate == project)
            .map(|(_, program, args)| LaunchPlan::Command {
                command: ResolvedCommand::new(*program, args.iter().copied()),
                working_directory: launch_path.to_path_buf(),
            })
            .ok_or_else(|| LaunchError::NoStrategy {
                kind: kind.label().to_string(),
                path: launch_path.display().to_string(),
            }),
        None => python_plan(launch_path).ok_or_else(|| LaunchError::NoStrategy {
            kind: kind.label().to_string(),
            path: launch_path.display().to_string(),
        }),
    }
}
