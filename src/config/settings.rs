use super::{ConfigError, SANDBOX_DIR_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const GAME_KEYWORDS: &[&str] = &[
    "game",
    "play",
    "puzzle",
    "arcade",
    "adventure",
    "action",
    "rpg",
    "strategy",
    "simulation",
    "racing",
    "sports",
    "shooter",
    "platformer",
    "tetris",
    "snake",
    "pong",
    "chess",
    "checkers",
    "solitaire",
    "poker",
    "blackjack",
    "mario",
    "zelda",
    "minecraft",
    "doom",
    "quake",
    "sim",
    "tycoon",
    "city",
    "farm",
    "defense",
    "tower",
    "match",
    "candy",
    "bird",
    "run",
    "jump",
    "fight",
    "battle",
    "war",
    "quest",
    "dungeon",
    "castle",
    "knight",
    "ninja",
    "pirate",
];

const PROJECT_ONLY_KEYWORDS: &[&str] = &[
    "fun",
    "entertainment",
    "toy",
    "mini",
    "simple",
    "classic",
];

const DIRECTORY_HINTS: &[&str] = &["game", "play", "arcade", "entertainment"];

const ENTRY_KEYWORDS: &[&str] = &["game", "play", "main", "start", "run", "app"];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScanSettings {
    /// Walk depth for the per-file pass.
    #[serde(default = "default_file_depth")]
    pub file_depth: usize,
    /// Walk depth for the per-subdirectory pass.
    #[serde(default = "default_directory_depth")]
    pub directory_depth: usize,
    /// Depth used when looking for entry-point-like file names inside a directory.
    #[serde(default = "default_entry_file_depth")]
    pub entry_file_depth: usize,
    /// Depth used when looking for loose Python files inside a directory.
    #[serde(default = "default_script_file_depth")]
    pub script_file_depth: usize,
    #[serde(default = "default_game_keywords")]
    pub game_keywords: Vec<String>,
    #[serde(default = "default_project_keywords")]
    pub project_keywords: Vec<String>,
    #[serde(default = "default_directory_hints")]
    pub directory_hints: Vec<String>,
    #[serde(default = "default_entry_keywords")]
    pub entry_keywords: Vec<String>,
    /// Roots scanned by default; empty means the home-directory defaults.
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            file_depth: default_file_depth(),
            directory_depth: default_directory_depth(),
            entry_file_depth: default_entry_file_depth(),
            script_file_depth: default_script_file_depth(),
            game_keywords: default_game_keywords(),
            project_keywords: default_project_keywords(),
            directory_hints: default_directory_hints(),
            entry_keywords: default_entry_keywords(),
            roots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceRootRule {
    pub path: PathBuf,
    pub depth: usize,
}

impl SourceRootRule {
    pub fn new(path: impl Into<PathBuf>, depth: usize) -> Self {
        Self {
            path: path.into(),
            depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassifySettings {
    #[serde(default = "default_bare_source_extension")]
    pub bare_source_extension: String,
    /// Roots, relative to the classified directory, searched for loose sources.
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<SourceRootRule>,
    /// Conventional source directory classified once when nothing else matches.
    #[serde(default = "default_source_subdirectory")]
    pub source_subdirectory: PathBuf,
}

impl Default for ClassifySettings {
    fn default() -> Self {
        Self {
            bare_source_extension: default_bare_source_extension(),
            source_roots: default_source_roots(),
            source_subdirectory: default_source_subdirectory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildSettings {
    #[serde(default = "default_compiler")]
    pub compiler: String,
    #[serde(default = "default_launcher")]
    pub launcher: String,
    #[serde(default = "default_bare_source_extension")]
    pub source_extension: String,
    #[serde(default = "default_entry_marker")]
    pub entry_marker: String,
    #[serde(default = "default_discovery_roots")]
    pub discovery_roots: Vec<PathBuf>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            launcher: default_launcher(),
            source_extension: default_bare_source_extension(),
            entry_marker: default_entry_marker(),
            discovery_roots: default_discovery_roots(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SandboxSettings {
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivitySettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_flag_clear_ms")]
    pub flag_clear_ms: u64,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            flag_clear_ms: default_flag_clear_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShellSettings {
    pub program: String,
    pub flag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub classify: ClassifySettings,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub sandbox: SandboxSettings,
    #[serde(default)]
    pub activity: ActivitySettings,
    #[serde(default)]
    pub shell: Option<ShellSettings>,
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Configured sandbox root, or `sandbox/` under the state root.
    pub fn resolve_sandbox_root(&self, state_root: &Path) -> PathBuf {
        self.sandbox
            .root
            .clone()
            .unwrap_or_else(|| state_root.join(SANDBOX_DIR_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_scan()
            .map_err(|message| ConfigError::Section {
                section: "scan",
                message,
            })?;
        self.validate_classify()
            .map_err(|message| ConfigError::Section {
                section: "classify",
                message,
            })?;
        self.validate_build()
            .map_err(|message| ConfigError::Section {
                section: "build",
                message,
            })?;

        if let Some(root) = &self.sandbox.root {
            if !root.is_absolute() {
                return Err(ConfigError::Section {
                    section: "sandbox",
                    message: "`root` must be an absolute path".to_string(),
                });
            }
        }
        if self.activity.poll_interval_ms == 0 || self.activity.flag_clear_ms == 0 {
            return Err(ConfigError::Section {
                section: "activity",
                message: "intervals must be greater than zero".to_string(),
            });
        }
        if let Some(shell) = &self.shell {
            if shell.program.trim().is_empty() {
                return Err(ConfigError::Section {
                    section: "shell",
                    message: "`program` must be non-empty".to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_scan(&self) -> Result<(), String> {
        let scan = &self.scan;
        for (field, depth) in [
            ("file_depth", scan.file_depth),
            ("directory_depth", scan.directory_depth),
            ("entry_file_depth", scan.entry_file_depth),
            ("script_file_depth", scan.script_file_depth),
        ] {
            if depth == 0 {
                return Err(format!("`{field}` must be at least 1"));
            }
        }
        for (field, words) in [
            ("game_keywords", &scan.game_keywords),
            ("project_keywords", &scan.project_keywords),
            ("directory_hints", &scan.directory_hints),
            ("entry_keywords", &scan.entry_keywords),
        ] {
            if words.iter().any(|word| word.trim().is_empty()) {
                return Err(format!("`{field}` must not contain blank keywords"));
            }
        }
        Ok(())
    }

    fn validate_classify(&self) -> Result<(), String> {
        let classify = &self.classify;
        if classify.bare_source_extension.trim().is_empty() {
            return Err("`bare_source_extension` must be non-empty".to_string());
        }
        if let Some(rule) = classify.source_roots.iter().find(|rule| rule.path.is_absolute()) {
            return Err(format!(
                "source root `{}` must be relative",
                rule.path.display()
            ));
        }
        if classify.source_subdirectory.is_absolute()
            || classify.source_subdirectory.as_os_str().is_empty()
        {
            return Err("`source_subdirectory` must be a non-empty relative path".to_string());
        }
        Ok(())
    }

    fn validate_build(&self) -> Result<(), String> {
        let build = &self.build;
        for (field, value) in [
            ("compiler", &build.compiler),
            ("launcher", &build.launcher),
            ("source_extension", &build.source_extension),
            ("entry_marker", &build.entry_marker),
        ] {
            if value.trim().is_empty() {
                return Err(format!("`{field}` must be non-empty"));
            }
        }
        if build.discovery_roots.is_empty() {
            return Err("`discovery_roots` must list at least one root".to_string());
        }
        if let Some(root) = build.discovery_roots.iter().find(|root| root.is_absolute()) {
            return Err(format!(
                "discovery root `{}` must be relative",
                root.display()
            ));
        }
        Ok(())
    }
}

fn default_file_depth() -> usize {
    3
}

fn default_directory_depth() -> usize {
    2
}

fn default_entry_file_depth() -> usize {
    3
}

fn default_script_file_depth() -> usize {
    2
}

fn default_game_keywords() -> Vec<String> {
    owned(GAME_KEYWORDS)
}

fn default_project_keywords() -> Vec<String> {
    let mut words = owned(GAME_KEYWORDS);
    words.extend(owned(PROJECT_ONLY_KEYWORDS));
    words
}

fn default_directory_hints() -> Vec<String> {
    owned(DIRECTORY_HINTS)
}

fn default_entry_keywords() -> Vec<String> {
    owned(ENTRY_KEYWORDS)
}

fn default_bare_source_extension() -> String {
    "java".to_string()
}

fn default_source_roots() -> Vec<SourceRootRule> {
    vec![
        SourceRootRule::new(".", 1),
        SourceRootRule::new("src", 3),
        SourceRootRule::new("src/main/java", 5),
    ]
}

fn default_source_subdirectory() -> PathBuf {
    PathBuf::from("src")
}

fn default_compiler() -> String {
    "javac".to_string()
}

fn default_launcher() -> String {
    "java".to_string()
}

fn default_entry_marker() -> String {
    "public static void main".to_string()
}

fn default_discovery_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from("."),
        PathBuf::from("src"),
        PathBuf::from("src/main/java"),
        PathBuf::from("src/java"),
    ]
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

fn default_flag_clear_ms() -> u64 {
    3_000
}
