use crate::classify::ProjectKind;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolverError {
    #[error("command index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOption {
    Shell(String),
    BuildPipeline {
        label: &'static str,
        run_after_build: bool,
    },
    Custom,
    Cancel,
}

impl CommandOption {
    pub fn label(&self) -> &str {
        match self {
            Self::Shell(line) => line,
            Self::BuildPipeline { label, .. } => *label,
            Self::Custom => "Custom command...",
            Self::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Shell(String),
    BuildPipeline { run_after_build: bool },
    Cancelled,
}

enum TableEntry {
    Shell(&'static str),
    Build(&'static str, bool),
}

struct KindCommands {
    kind: ProjectKind,
    entries: &'static [TableEntry],
}

const COMMAND_TABLE: &[KindCommands] = &[
    KindCommands {
        kind: ProjectKind::Maven,
        entries: &[
            TableEntry::Shell("mvn spring-boot:run"),
            TableEntry::Shell("mvn exec:java"),
            TableEntry::Shell("mvn compile exec:java"),
        ],
    },
    KindCommands {
        kind: ProjectKind::Gradle,
        entries: &[
            TableEntry::Shell("./gradlew run"),
            TableEntry::Shell("./gradlew bootRun"),
            TableEntry::Shell("gradle run"),
        ],
    },
    KindCommands {
        kind: ProjectKind::Node,
        entries: &[
            TableEntry::Shell("npm start"),
            TableEntry::Shell("npm run dev"),
            TableEntry::Shell("node index.js"),
            TableEntry::Shell("node app.js"),
        ],
    },
    KindCommands {
        kind: ProjectKind::Python,
        entries: &[
            TableEntry::Shell("python main.py"),
            TableEntry::Shell("python app.py"),
            TableEntry::Shell("python manage.py runserver"),
            TableEntry::Shell("pip install -r requirements.txt"),
        ],
    },
    KindCommands {
        kind: ProjectKind::Rust,
        entries: &[TableEntry::Shell("cargo run"), TableEntry::Shell("cargo build")],
    },
    KindCommands {
        kind: ProjectKind::Go,
        entries: &[
            TableEntry::Shell("go run ."),
            TableEntry::Shell("go run main.go"),
            TableEntry::Shell("go build"),
        ],
    },
    KindCommands {
        kind: ProjectKind::Make,
        entries: &[TableEntry::Shell("make"), TableEntry::Shell("make run")],
    },
    KindCommands {
        kind: ProjectKind::JavaSource,
        entries: &[
            TableEntry::Build("Compile & Run Main", true),
            TableEntry::Build("Compile All Java Files", false),
        ],
    },
];

/// Ordered menu for one classification. Always ends with `Custom` then `Cancel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    pub kind: Option<ProjectKind>,
    pub options: Vec<CommandOption>,
}

impl RunCommand {
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(CommandOption::label).collect()
    }

    /// Resolves the chosen entry. `prompt` is only consulted for `Custom`;
    /// a missing or blank answer counts as cancellation.
    pub fn select<F>(&self, index: usize, prompt: F) -> Result<Selection, ResolverError>
    where
        F: FnOnce() -> Option<String>,
    {
        let option = self
            .options
            .get(index)
            .ok_or(ResolverError::IndexOutOfRange {
                index,
                len: self.options.len(),
            })?;

        Ok(match option {
            CommandOption::Shell(line) => Selection::Shell(line.clone()),
            CommandOption::BuildPipeline {
                run_after_build, ..
            } => Selection::BuildPipeline {
                run_after_build: *run_after_build,
            },
            CommandOption::Custom => match prompt() {
                Some(text) if !text.trim().is_empty() => Selection::Shell(text.trim().to_string()),
                _ => Selection::Cancelled,
            },
            CommandOption::Cancel => Selection::Cancelled,
        })
    }
}

pub fn commands_for(kind: Option<ProjectKind>) -> RunCommand {
    let mut options: Vec<CommandOption> = kind
        .and_then(|kind| COMMAND_TABLE.iter().find(|row| row.kind == kind))
        .map(|row| {
            row.entries
                .iter()
                .map(|entry| match entry {
                    TableEntry::Shell(line) => CommandOption::Shell(line.to_string()),
                    TableEntry::Build(label, run_after_build) => CommandOption::BuildPipeline {
                        label: *label,
                        run_after_build: *run_after_build,
                    },
                })
                .collect()
        })
        .unwrap_or_default();
    options.push(CommandOption::Custom);
    options.push(CommandOption::Cancel);
    RunCommand { kind, options }
}
