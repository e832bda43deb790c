use super::SandboxError;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Deletes a tree children-first. Symlinks are removed, never followed.
pub fn remove_tree(root: &Path) -> Result<(), SandboxError> {
    let meta = match fs::symlink_metadata(root) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(SandboxError::Remove {
                path: display(root),
                source,
            })
        }
    };
    if !meta.is_dir() {
        return fs::remove_file(root).map_err(|source| SandboxError::Remove {
            path: display(root),
            source,
        });
    }

    for entry in WalkDir::new(root).follow_links(false).contents_first(true) {
        let entry = entry.map_err(|err| SandboxError::Remove {
            path: err
                .path()
                .map(display)
                .unwrap_or_else(|| display(root)),
            source: err.into(),
        })?;
        let path = entry.path();
        let removed = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|source| SandboxError::Remove {
            path: display(path),
            source,
        })?;
    }
    Ok(())
}

/// Recreates `source` under `target`. Directories are created before the
/// files inside them; symlinked directories are followed, with loops
/// reported as errors.
pub fn copy_tree(source: &Path, target: &Path) -> Result<(), SandboxError> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|err| SandboxError::Copy {
            path: err
                .path()
                .map(display)
                .unwrap_or_else(|| display(source)),
            source: err.into(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or_else(|_| entry.path());
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).map_err(|source| SandboxError::CreateDir {
                path: display(&destination),
                source,
            })?;
        } else {
            fs::copy(entry.path(), &destination).map_err(|source| SandboxError::Copy {
                path: display(entry.path()),
                source,
            })?;
        }
    }
    Ok(())
}
