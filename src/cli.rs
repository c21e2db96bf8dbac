//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Link tool-specific skills directories to one shared skills directory.
#[derive(Parser, Debug)]
#[command(
    name = "skills-link",
    about = "Link tool-specific skills directories to one shared skills directory",
    version
)]
pub struct Cli {
    /// Subcommand to run; `link` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to run, defaulting to [`Command::Link`].
    #[must_use]
    pub fn subcommand_or_default(&self) -> Command {
        self.command.unwrap_or(Command::Link)
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Root directory (overrides `INIT_CWD` and `npm_config_local_prefix`)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create or repair every link (default)
    Link,
    /// Remove links that point at the shared directory
    Unlink,
    /// Report the state of every link without changing anything
    Status,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file and messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Unlink => "unlink",
            Self::Status => "status",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_link() {
        let cli = Cli::parse_from(["skills-link"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.subcommand_or_default(), Command::Link);
    }

    #[test]
    fn parse_subcommands() {
        for (arg, expected) in [
            ("link", Command::Link),
            ("unlink", Command::Unlink),
            ("status", Command::Status),
            ("version", Command::Version),
        ] {
            let cli = Cli::parse_from(["skills-link", arg]);
            assert_eq!(cli.subcommand_or_default(), expected);
            assert_eq!(expected.name(), arg);
        }
    }

    #[test]
    fn parse_dry_run_short_after_subcommand() {
        let cli = Cli::parse_from(["skills-link", "link", "-d"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["skills-link", "--root", "/tmp/project", "status"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.subcommand_or_default(), Command::Status);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["skills-link", "-v"]);
        assert!(cli.verbose);
        assert!(!cli.global.dry_run);
        assert!(cli.global.root.is_none());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["skills-link", "install"]).is_err());
    }
}
