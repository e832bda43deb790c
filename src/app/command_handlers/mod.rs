use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod games;
pub mod projects;
pub mod watch;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Classify => projects::cmd_classify(&args[1..]),
        CliVerb::Commands => projects::cmd_commands(&args[1..]),
        CliVerb::Run => projects::cmd_run(&args[1..]),
        CliVerb::Exec => projects::cmd_exec(&args[1..]),
        CliVerb::Build => projects::cmd_build(&args[1..]),
        CliVerb::Scan => games::cmd_scan(&args[1..]),
        CliVerb::Launch => games::cmd_launch(&args[1..]),
        CliVerb::Verify => games::cmd_verify(&args[1..]),
        CliVerb::Info => games::cmd_info(&args[1..]),
        CliVerb::Sandbox => games::cmd_sandbox(&args[1..]),
        CliVerb::Watch => watch::cmd_watch(&args[1..]),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
