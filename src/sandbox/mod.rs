//! Disposable per-game copies under one sandbox root.
//!
//! Each candidate maps to `<root>/<safe name>`. Materializing always deletes
//! whatever sits at that path first, so the copy never mixes old and new
//! content. Two materializations of the same safe name are not synchronized.

pub mod fs_ops;

use crate::classify::GameCandidate;
use crate::shared::fs_atomic::absolute_or_joined;
use std::fs;
use std::path::{Path, PathBuf};

pub use fs_ops::{copy_tree, remove_tree};

#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("game name `{name}` has no characters usable as a sandbox directory")]
    EmptyName { name: String },
    #[error("game source {path} does not exist")]
    SourceMissing { path: String },
    #[error("game source {path} overlaps sandbox root {root}")]
    Overlap { path: String, root: String },
    #[error("failed to remove stale sandbox entry {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create sandbox directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to copy {path} into the sandbox: {source}")]
    Copy {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list sandbox root {path}: {source}")]
    List {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Keeps ASCII letters, digits and whitespace, then collapses each whitespace
/// run into one underscore.
pub fn safe_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxEntry {
    pub candidate: GameCandidate,
    pub sandbox_dir: PathBuf,
    pub launch_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_dir(&self, candidate: &GameCandidate) -> Result<PathBuf, SandboxError> {
        let name = safe_name(&candidate.name);
        if name.is_empty() {
            return Err(SandboxError::EmptyName {
                name: candidate.name.clone(),
            });
        }
        Ok(self.root.join(name))
    }

    pub fn materialize(&self, candidate: &GameCandidate) -> Result<SandboxEntry, SandboxError> {
        let sandbox_dir = self.entry_dir(candidate)?;
        let source = &candidate.source_path;
        let meta = fs::metadata(source).map_err(|_| SandboxError::SourceMissing {
            path: source.display().to_string(),
        })?;
        self.ensure_disjoint(source, &sandbox_dir)?;

        remove_tree(&sandbox_dir)?;

        let launch_path = if meta.is_dir() {
            copy_tree(source, &sandbox_dir)?;
            sandbox_dir.clone()
        } else {
            fs::create_dir_all(&sandbox_dir).map_err(|source| SandboxError::CreateDir {
                path: sandbox_dir.display().to_string(),
                source,
            })?;
            let file_name = source
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(sandbox_dir.file_name().unwrap_or_default()));
            let target = sandbox_dir.join(file_name);
            fs::copy(source, &target).map_err(|err| SandboxError::Copy {
                path: source.display().to_string(),
                source: err,
            })?;
            target
        };

        Ok(SandboxEntry {
            candidate: candidate.clone(),
            sandbox_dir,
            launch_path,
        })
    }

    /// A source that contains its own copy, or lives inside the sandbox,
    /// would be copied into itself.
    fn ensure_disjoint(&self, source: &Path, sandbox_dir: &Path) -> Result<(), SandboxError> {
        let source = absolute_or_joined(source);
        let root = absolute_or_joined(&self.root);
        let target = match sandbox_dir.file_name() {
            Some(name) => root.join(name),
            None => root.clone(),
        };
        if target.starts_with(&source) || source.starts_with(&root) {
            return Err(SandboxError::Overlap {
                path: source.display().to_string(),
                root: root.display().to_string(),
            });
        }
        Ok(())
    }

    /// Names of the entries currently materialized, sorted.
    pub fn entries(&self) -> Result<Vec<String>, SandboxError> {
        let listing = match fs::read_dir(&self.root) {
            Ok(listing) => listing,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SandboxError::List {
                    path: self.root.display().to_string(),
                    source,
                })
            }
        };
        let mut names: Vec<String> = listing
            .flatten()
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Deletes one materialized entry by its safe name.
    pub fn purge(&self, name: &str) -> Result<bool, SandboxError> {
        let safe = safe_name(name);
        if safe.is_empty() {
            return Err(SandboxError::EmptyName {
                name: name.to_string(),
            });
        }
        let path = self.root.join(safe);
        if fs::symlink_metadata(&path).is_err() {
            return Ok(false);
        }
        remove_tree(&path)?;
        Ok(true)
    }
}
