#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Classify,
    Commands,
    Run,
    Exec,
    Build,
    Scan,
    Launch,
    Verify,
    Info,
    Sandbox,
    Watch,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "classify" => CliVerb::Classify,
        "commands" => CliVerb::Commands,
        "run" => CliVerb::Run,
        "exec" => CliVerb::Exec,
        "build" => CliVerb::Build,
        "scan" => CliVerb::Scan,
        "launch" => CliVerb::Launch,
        "verify" => CliVerb::Verify,
        "info" => CliVerb::Info,
        "sandbox" => CliVerb::Sandbox,
        "watch" => CliVerb::Watch,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  classify <path> [selected]           Detect the project kind of a directory".to_string(),
        "  commands <path>                      List run commands for a directory".to_string(),
        "  run <path> <index> [custom...]       Run a listed command in the project root"
            .to_string(),
        "  exec <cwd> <command...>              Run a free-form command line".to_string(),
        "  build <path> [--no-run]              Compile loose sources and run the entry point"
            .to_string(),
        "  scan [roots...]                      Scan for games".to_string(),
        "  launch <index> [roots...]            Copy a game into the sandbox and start it"
            .to_string(),
        "  verify <index> [roots...]            Check that a game's source is readable".to_string(),
        "  info <index> [roots...]              Show details for a game".to_string(),
        "  sandbox [purge <name>]               List or remove sandbox copies".to_string(),
        "  watch <path> [seconds]               Report modification activity in a directory"
            .to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}
