use super::games::{GameCandidate, WorkingState};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One immutable scan result. Consumers hold an `Arc` to it while iterating;
/// newer scans and verifications publish a fresh snapshot instead of editing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub generation: u64,
    pub candidates: Vec<GameCandidate>,
}

impl CatalogSnapshot {
    pub fn get(&self, index: usize) -> Option<&GameCandidate> {
        self.candidates.get(index)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CandidateCatalog {
    current: Mutex<Arc<CatalogSnapshot>>,
}

impl CandidateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    pub fn publish(&self, candidates: Vec<GameCandidate>) -> Arc<CatalogSnapshot> {
        let mut current = self.current.lock().unwrap_or_else(|err| err.into_inner());
        let next = Arc::new(CatalogSnapshot {
            generation: current.generation + 1,
            candidates,
        });
        *current = next.clone();
        next
    }

    /// Re-checks every candidate with this source path and publishes the result.
    pub fn verify(&self, source_path: &Path) -> Option<WorkingState> {
        let state = check_working(source_path);
        let mut current = self.current.lock().unwrap_or_else(|err| err.into_inner());
        if !current
            .candidates
            .iter()
            .any(|candidate| candidate.source_path == source_path)
        {
            return None;
        }

        let mut candidates = current.candidates.clone();
        for candidate in candidates
            .iter_mut()
            .filter(|candidate| candidate.source_path == source_path)
        {
            candidate.working_state = state;
        }
        *current = Arc::new(CatalogSnapshot {
            generation: current.generation + 1,
            candidates,
        });
        Some(state)
    }
}

/// Working when the path exists and can be opened for reading.
pub fn check_working(path: &Path) -> WorkingState {
    let readable = match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => fs::read_dir(path).is_ok(),
        Ok(_) => fs::File::open(path).is_ok(),
        Err(_) => false,
    };
    if readable {
        WorkingState::Working
    } else {
        WorkingState::Broken
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} B")
    } else if value < MB {
        format!("{:.1} KB", value / KB)
    } else if value < GB {
        format!("{:.1} MB", value / MB)
    } else {
        format!("{:.1} GB", value / GB)
    }
}

pub fn describe(candidate: &GameCandidate) -> Vec<String> {
    let size = fs::metadata(&candidate.source_path)
        .map(|meta| format_file_size(meta.len()))
        .unwrap_or_else(|_| "unavailable".to_string());
    vec![
        format!("Game Name: {}", candidate.name),
        format!("Type: {}", candidate.kind.label()),
        format!("Path: {}", candidate.source_path.display()),
        format!("Description: {}", candidate.description),
        format!("Status: {}", candidate.working_state.as_str()),
        format!("File Size: {size}"),
    ]
}
