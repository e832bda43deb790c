use super::ResolvedCommand;
use crate::config::ShellSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSpec {
    pub program: String,
    pub flag: String,
}

impl ShellSpec {
    pub fn platform() -> Self {
        if cfg!(windows) {
            Self::new("cmd", "/c")
        } else {
            Self::new("sh", "-c")
        }
    }

    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    pub fn from_settings(settings: Option<&ShellSettings>) -> Self {
        match settings {
            Some(shell) => Self::new(shell.program.clone(), shell.flag.clone()),
            None => Self::platform(),
        }
    }

    /// The whole line is handed to the shell as a single argument.
    pub fn wrap(&self, line: &str) -> ResolvedCommand {
        let mut args = Vec::new();
        if !self.flag.is_empty() {
            args.push(self.flag.clone());
        }
        args.push(line.to_string());
        ResolvedCommand {
            program: self.program.clone(),
            args,
        }
    }
}

impl Default for ShellSpec {
    fn default() -> Self {
        Self::platform()
    }
}
