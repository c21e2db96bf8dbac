//! `skills-link` command-line entry point.
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser as _;

use skills_link::cli::{Cli, Command};
use skills_link::commands;
use skills_link::logging::{self, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let cli = Cli::parse();
    let command = cli.subcommand_or_default();

    if command == Command::Version {
        commands::version::run();
        return ExitCode::SUCCESS;
    }

    logging::init_subscriber(cli.verbose, command.name());
    let log = Arc::new(Logger::new(command.name()));

    let result = match command {
        Command::Link => commands::link::run(&cli.global, &log),
        Command::Unlink => commands::unlink::run(&cli.global, &log),
        Command::Status => commands::status::run(&cli.global, &log),
        Command::Version => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
