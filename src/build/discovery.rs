use crate::classify::walk::extension_lowercase;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDiscovery {
    /// Directory the compiler and launcher run in.
    pub base: PathBuf,
    /// Existing discovery roots, in search order.
    pub searched: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl SourceDiscovery {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_project_root(relative: &Path) -> bool {
    relative.as_os_str().is_empty() || relative == Path::new(".")
}

/// Collects every file with `extension` under the existing roots. The first
/// existing non-root entry becomes the compilation base. Files reachable from
/// more than one root are kept once, at their first position.
pub fn discover_sources(root: &Path, roots: &[PathBuf], extension: &str) -> SourceDiscovery {
    let mut base: Option<PathBuf> = None;
    let mut searched = Vec::new();
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for relative in roots {
        let dir = if is_project_root(relative) {
            root.to_path_buf()
        } else {
            root.join(relative)
        };
        if !dir.is_dir() {
            continue;
        }
        if base.is_none() && !is_project_root(relative) {
            base = Some(dir.clone());
        }

        for entry in WalkDir::new(&dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file()
                || !extension_lowercase(entry.path()).eq_ignore_ascii_case(extension)
            {
                continue;
            }
            let path = entry.into_path();
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        searched.push(dir);
    }

    SourceDiscovery {
        base: base.unwrap_or_else(|| root.to_path_buf()),
        searched,
        files,
    }
}
