use super::project::{has_bare_sources, manifest_kind, ProjectKind};
use super::walk::{
    contains_keyword, extension_lowercase, has_file_with_extension, name_lowercase, walk_bounded,
    walk_pruned,
};
use crate::config::{ClassifySettings, ScanSettings};
use crate::shared::fs_atomic::absolute_or_joined;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    JavaArchive,
    PythonScript,
    WebPage,
    NativeExecutable,
    ShellScript,
    Project(Option<ProjectKind>),
}

impl GameKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::JavaArchive => "Java Game",
            Self::PythonScript => "Python Game",
            Self::WebPage => "Web Game",
            Self::NativeExecutable => "Native Game",
            Self::ShellScript => "Script Game",
            Self::Project(Some(ProjectKind::Maven)) => "Maven Game Project",
            Self::Project(Some(ProjectKind::Gradle)) => "Gradle Game Project",
            Self::Project(Some(ProjectKind::Node)) => "Node.js Game Project",
            Self::Project(Some(ProjectKind::JavaSource)) => "Java Game Project",
            Self::Project(Some(ProjectKind::Python)) => "Python Game Project",
            Self::Project(Some(ProjectKind::Rust)) => "Rust Game Project",
            Self::Project(Some(ProjectKind::Go)) => "Go Game Project",
            Self::Project(Some(ProjectKind::Make)) => "C/C++ Game Project",
            Self::Project(None) => "Game Project",
        }
    }

    fn project_description(kind: Option<ProjectKind>) -> &'static str {
        match kind {
            Some(ProjectKind::Maven) => "Maven-based Java game project",
            Some(ProjectKind::Gradle) => "Gradle-based Java game project",
            Some(ProjectKind::Node) => "JavaScript/Node.js game project",
            Some(ProjectKind::JavaSource) => "Plain Java game project",
            Some(ProjectKind::Python) => "Python game project",
            Some(ProjectKind::Rust) => "Cargo-based Rust game project",
            Some(ProjectKind::Go) => "Go module game project",
            Some(ProjectKind::Make) => "Makefile-based game project",
            None => "Project containing game files",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingState {
    #[default]
    Unknown,
    Working,
    Broken,
}

impl WorkingState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Working => "Working",
            Self::Broken => "Broken",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameCandidate {
    pub name: String,
    pub kind: GameKind,
    pub source_path: PathBuf,
    pub description: String,
    #[serde(default)]
    pub working_state: WorkingState,
}

impl GameCandidate {
    pub fn new(kind: GameKind, source_path: PathBuf, description: impl Into<String>) -> Self {
        Self {
            name: display_name_for(&source_path),
            kind,
            source_path,
            description: description.into(),
            working_state: WorkingState::Unknown,
        }
    }
}

struct FileRule {
    extensions: &'static [&'static str],
    kind: GameKind,
    description: &'static str,
    /// Also accept files whose parent directory name carries a hint keyword.
    directory_hint: bool,
}

const FILE_RULES: &[FileRule] = &[
    FileRule {
        extensions: &["jar"],
        kind: GameKind::JavaArchive,
        description: "JAR executable game",
        directory_hint: false,
    },
    FileRule {
        extensions: &["py"],
        kind: GameKind::PythonScript,
        description: "Python script game",
        directory_hint: false,
    },
    FileRule {
        extensions: &["js", "html"],
        kind: GameKind::WebPage,
        description: "HTML/JavaScript game",
        directory_hint: false,
    },
    FileRule {
        extensions: &["exe", "app", ""],
        kind: GameKind::NativeExecutable,
        description: "Native executable game",
        directory_hint: true,
    },
    FileRule {
        extensions: &["sh", "bat"],
        kind: GameKind::ShellScript,
        description: "Shell script game",
        directory_hint: false,
    },
];

/// Title-cased stem: `space-invaders_v2.py` becomes `Space Invaders V2`.
pub fn display_name_for(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name.as_str(),
    };

    stem.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.as_str().to_lowercase().chars())
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn detect_game_file(file: &Path, scan: &ScanSettings) -> Option<GameCandidate> {
    let extension = extension_lowercase(file);
    let rule = FILE_RULES
        .iter()
        .find(|rule| rule.extensions.contains(&extension.as_str()))?;

    let name_hit = contains_keyword(&name_lowercase(file), &scan.game_keywords);
    let hint_hit = rule.directory_hint
        && file
            .parent()
            .map(|parent| contains_keyword(&name_lowercase(parent), &scan.directory_hints))
            .unwrap_or(false);

    (name_hit || hint_hit)
        .then(|| GameCandidate::new(rule.kind, file.to_path_buf(), rule.description))
}

/// Project kind recorded for a game directory: descriptor kinds first, then
/// loose Java sources, then any Python file.
pub fn detect_game_project_kind(
    dir: &Path,
    scan: &ScanSettings,
    classify: &ClassifySettings,
) -> Option<ProjectKind> {
    manifest_kind(dir).or_else(|| loose_source_kind(dir, scan, classify))
}

fn loose_source_kind(
    dir: &Path,
    scan: &ScanSettings,
    classify: &ClassifySettings,
) -> Option<ProjectKind> {
    if has_bare_sources(dir, &classify.source_roots, &classify.bare_source_extension) {
        return Some(ProjectKind::JavaSource);
    }
    if has_file_with_extension(dir, scan.script_file_depth, "py") {
        return Some(ProjectKind::Python);
    }
    None
}

fn has_entry_like_files(dir: &Path, scan: &ScanSettings) -> bool {
    walk_bounded(dir, scan.entry_file_depth).any(|entry| {
        entry.file_type().is_file()
            && contains_keyword(&name_lowercase(entry.path()), &scan.entry_keywords)
    })
}

pub fn detect_game_directory(
    dir: &Path,
    scan: &ScanSettings,
    classify: &ClassifySettings,
) -> Option<GameCandidate> {
    let kind = detect_game_project_kind(dir, scan, classify);
    let name_hit = contains_keyword(&name_lowercase(dir), &scan.project_keywords);
    let descriptor_hit = manifest_kind(dir).is_some();

    if name_hit || descriptor_hit || has_entry_like_files(dir, scan) {
        return Some(GameCandidate::new(
            GameKind::Project(kind),
            dir.to_path_buf(),
            GameKind::project_description(kind),
        ));
    }
    None
}

/// Two independent passes; overlapping candidates are kept as-is.
pub fn scan(root: &Path, scan: &ScanSettings, classify: &ClassifySettings) -> Vec<GameCandidate> {
    scan_excluding(root, scan, classify, &[])
}

/// Scans `root` without entering any of `excluded` (e.g. the state and
/// sandbox roots, whose contents must never become candidates).
pub fn scan_excluding(
    root: &Path,
    scan: &ScanSettings,
    classify: &ClassifySettings,
    excluded: &[PathBuf],
) -> Vec<GameCandidate> {
    let root = absolute_or_joined(root);
    if !root.is_dir() {
        return Vec::new();
    }
    let excluded: Vec<PathBuf> = excluded
        .iter()
        .map(|path| absolute_or_joined(path))
        .collect();

    let mut found: Vec<GameCandidate> = walk_pruned(&root, scan.file_depth, &excluded)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| detect_game_file(entry.path(), scan))
        .collect();

    found.extend(
        walk_pruned(&root, scan.directory_depth, &excluded)
            .filter(|entry| entry.depth() > 0 && entry.file_type().is_dir())
            .filter_map(|entry| detect_game_directory(entry.path(), scan, classify)),
    );
    found
}

pub fn scan_roots(
    roots: &[PathBuf],
    scan_settings: &ScanSettings,
    classify: &ClassifySettings,
    excluded: &[PathBuf],
) -> Vec<GameCandidate> {
    roots
        .iter()
        .filter(|root| root.is_dir())
        .flat_map(|root| scan_excluding(root, scan_settings, classify, excluded))
        .collect()
}
