use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Entries under `root` down to `max_depth` (root itself is depth 0).
/// Unreadable entries are dropped so one bad subtree never ends a walk.
pub(crate) fn walk_bounded(root: &Path, max_depth: usize) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(Result::ok)
}

/// Like [`walk_bounded`], but never descends into any of `excluded`.
pub(crate) fn walk_pruned<'a>(
    root: &Path,
    max_depth: usize,
    excluded: &'a [PathBuf],
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(move |entry| !excluded.iter().any(|skip| entry.path().starts_with(skip)))
        .filter_map(Result::ok)
}

pub(crate) fn extension_lowercase(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

pub(crate) fn name_lowercase(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

pub(crate) fn has_file_with_extension(root: &Path, max_depth: usize, extension: &str) -> bool {
    walk_bounded(root, max_depth).any(|entry| {
        entry.file_type().is_file()
            && extension_lowercase(entry.path()).eq_ignore_ascii_case(extension)
    })
}

pub(crate) fn contains_keyword(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| haystack.contains(keyword.to_lowercase().as_str()))
}
