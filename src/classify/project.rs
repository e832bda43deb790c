use super::walk::has_file_with_extension;
use crate::config::{ClassifySettings, SourceRootRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    Maven,
    Gradle,
    Node,
    Python,
    Rust,
    Go,
    Make,
    JavaSource,
}

impl ProjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
            Self::Node => "node",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Make => "make",
            Self::JavaSource => "java_source",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Maven => "Maven Project",
            Self::Gradle => "Gradle Project",
            Self::Node => "Node.js Project",
            Self::Python => "Python Project",
            Self::Rust => "Rust Project",
            Self::Go => "Go Project",
            Self::Make => "C/C++ Project",
            Self::JavaSource => "Java Project",
        }
    }

    /// Kinds recognised from a build descriptor rather than loose sources.
    pub fn is_descriptor_based(self) -> bool {
        !matches!(self, Self::JavaSource)
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    NoMatch,
    Project { kind: ProjectKind, root: PathBuf },
}

impl ClassificationResult {
    pub fn kind(&self) -> Option<ProjectKind> {
        match self {
            Self::NoMatch => None,
            Self::Project { kind, .. } => Some(*kind),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        match self {
            Self::NoMatch => None,
            Self::Project { root, .. } => Some(root),
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

struct ManifestRule {
    kind: ProjectKind,
    files: &'static [&'static str],
}

/// Checked top to bottom; the first rule with any present file wins.
const MANIFEST_RULES: &[ManifestRule] = &[
    ManifestRule {
        kind: ProjectKind::Maven,
        files: &["pom.xml"],
    },
    ManifestRule {
        kind: ProjectKind::Gradle,
        files: &["build.gradle", "build.gradle.kts"],
    },
    ManifestRule {
        kind: ProjectKind::Node,
        files: &["package.json"],
    },
    ManifestRule {
        kind: ProjectKind::Python,
        files: &["requirements.txt", "main.py", "app.py", "manage.py"],
    },
    ManifestRule {
        kind: ProjectKind::Rust,
        files: &["Cargo.toml"],
    },
    ManifestRule {
        kind: ProjectKind::Go,
        files: &["go.mod"],
    },
    ManifestRule {
        kind: ProjectKind::Make,
        files: &["Makefile", "makefile"],
    },
];

pub fn manifest_kind(dir: &Path) -> Option<ProjectKind> {
    MANIFEST_RULES
        .iter()
        .find(|rule| rule.files.iter().any(|file| dir.join(file).exists()))
        .map(|rule| rule.kind)
}

pub fn has_bare_sources(dir: &Path, roots: &[SourceRootRule], extension: &str) -> bool {
    roots.iter().any(|rule| {
        let root = dir.join(&rule.path);
        root.is_dir() && has_file_with_extension(&root, rule.depth, extension)
    })
}

pub trait ProjectStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn detect(&self, dir: &Path) -> Option<ClassificationResult>;
}

pub struct ManifestStrategy;

impl ProjectStrategy for ManifestStrategy {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn detect(&self, dir: &Path) -> Option<ClassificationResult> {
        manifest_kind(dir).map(|kind| ClassificationResult::Project {
            kind,
            root: dir.to_path_buf(),
        })
    }
}

pub struct BareSourceStrategy {
    roots: Vec<SourceRootRule>,
    extension: String,
}

impl BareSourceStrategy {
    pub fn new(settings: &ClassifySettings) -> Self {
        Self {
            roots: settings.source_roots.clone(),
            extension: settings.bare_source_extension.clone(),
        }
    }
}

impl ProjectStrategy for BareSourceStrategy {
    fn name(&self) -> &'static str {
        "bare_source"
    }

    fn detect(&self, dir: &Path) -> Option<ClassificationResult> {
        has_bare_sources(dir, &self.roots, &self.extension).then(|| {
            ClassificationResult::Project {
                kind: ProjectKind::JavaSource,
                root: dir.to_path_buf(),
            }
        })
    }
}

/// Re-runs the direct strategies inside the conventional source directory.
/// Holds its own inner chain so the descent is exactly one level deep.
pub struct SourceSubdirectoryStrategy {
    subdirectory: PathBuf,
    inner: Vec<Box<dyn ProjectStrategy>>,
}

impl ProjectStrategy for SourceSubdirectoryStrategy {
    fn name(&self) -> &'static str {
        "source_subdirectory"
    }

    fn detect(&self, dir: &Path) -> Option<ClassificationResult> {
        let nested = dir.join(&self.subdirectory);
        if !nested.is_dir() {
            return None;
        }
        self.inner
            .iter()
            .find_map(|strategy| strategy.detect(&nested))
    }
}

fn direct_strategies(settings: &ClassifySettings) -> Vec<Box<dyn ProjectStrategy>> {
    vec![
        Box::new(ManifestStrategy),
        Box::new(BareSourceStrategy::new(settings)),
    ]
}

pub struct Classifier {
    strategies: Vec<Box<dyn ProjectStrategy>>,
}

impl Classifier {
    pub fn new(settings: &ClassifySettings) -> Self {
        let mut strategies = direct_strategies(settings);
        strategies.push(Box::new(SourceSubdirectoryStrategy {
            subdirectory: settings.source_subdirectory.clone(),
            inner: direct_strategies(settings),
        }));
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    pub fn classify(&self, dir: &Path) -> ClassificationResult {
        if !dir.is_dir() {
            return ClassificationResult::NoMatch;
        }
        self.strategies
            .iter()
            .find_map(|strategy| strategy.detect(dir))
            .unwrap_or(ClassificationResult::NoMatch)
    }

    /// Classifies `current`, falling back to a selected subdirectory on a miss.
    pub fn resolve_project(&self, current: &Path, selected: Option<&Path>) -> ClassificationResult {
        let result = self.classify(current);
        if result.is_match() {
            return result;
        }
        match selected {
            Some(dir) => self.classify(dir),
            None => ClassificationResult::NoMatch,
        }
    }
}

pub fn classify(dir: &Path, settings: &ClassifySettings) -> ClassificationResult {
    Classifier::new(settings).classify(dir)
}
