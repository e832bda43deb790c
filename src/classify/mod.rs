pub mod catalog;
pub mod games;
pub mod project;
pub(crate) mod walk;

pub use catalog::{check_working, describe, format_file_size, CandidateCatalog, CatalogSnapshot};
pub use games::{
    detect_game_directory, detect_game_file, detect_game_project_kind, display_name_for, scan,
    scan_excluding, scan_roots, GameCandidate, GameKind, WorkingState,
};
pub use project::{
    classify, has_bare_sources, manifest_kind, BareSourceStrategy, ClassificationResult,
    Classifier, ManifestStrategy, ProjectKind, ProjectStrategy, SourceSubdirectoryStrategy,
};
