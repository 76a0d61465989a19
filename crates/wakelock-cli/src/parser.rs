//! Command-line parser.
//!
//! Exactly one of the four mode flags must be given, plus exactly one
//! positional session PID. clap enforces both and exits with the usual
//! usage status on violation.

use clap::{ArgAction, ArgGroup, Parser};

use wakelock_core::SessionId;
use wakelock_runtime::Operation;

/// Command-line interface for the wakelock tool.
#[derive(Parser, Debug)]
#[command(name = "wakelock")]
#[command(about = "Keep the machine awake while registered sessions are alive")]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).multiple(false)))]
pub struct Cli {
    /// Register the session and disable sleep
    #[arg(short = 's', long = "start", group = "mode")]
    pub start: bool,

    /// Deregister the session; restore sleep defaults when none remain
    #[arg(short = 'e', long = "end", group = "mode")]
    pub end: bool,

    /// Prune markers for dead sessions, change nothing else
    #[arg(short = 'c', long = "cleanup", group = "mode")]
    pub cleanup: bool,

    /// Wipe the whole registry, then start this session (crash recovery)
    #[arg(short = 'o', long = "only-this-session", group = "mode")]
    pub only_this_session: bool,

    /// PID identifying the session
    #[arg(value_name = "SESSION_PID")]
    pub session: SessionId,

    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The operation selected by the mode flags.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        if self.start {
            Operation::Start
        } else if self.end {
            Operation::End
        } else if self.cleanup {
            Operation::Cleanup
        } else {
            Operation::OnlyThisSession
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parser_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn each_mode_flag_selects_its_operation() {
        let cases = [
            ("--start", Operation::Start),
            ("--end", Operation::End),
            ("--cleanup", Operation::Cleanup),
            ("--only-this-session", Operation::OnlyThisSession),
        ];
        for (flag, expected) in cases {
            let cli = Cli::parse_from(["wakelock", flag, "1234"]);
            assert_eq!(cli.operation(), expected, "flag {flag}");
            assert_eq!(cli.session.get(), 1234);
        }
    }

    #[test]
    fn short_flags_work() {
        let cli = Cli::parse_from(["wakelock", "-e", "42"]);
        assert_eq!(cli.operation(), Operation::End);
    }

    #[test]
    fn a_mode_flag_is_required() {
        assert!(Cli::try_parse_from(["wakelock", "1234"]).is_err());
    }

    #[test]
    fn mode_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["wakelock", "--start", "--end", "1234"]).is_err());
    }

    #[test]
    fn the_session_pid_is_required_and_singular() {
        assert!(Cli::try_parse_from(["wakelock", "--start"]).is_err());
        assert!(Cli::try_parse_from(["wakelock", "--start", "12", "34"]).is_err());
    }

    #[test]
    fn non_numeric_pids_are_rejected() {
        assert!(Cli::try_parse_from(["wakelock", "--start", "abc"]).is_err());
        assert!(Cli::try_parse_from(["wakelock", "--start", "0"]).is_err());
    }

    #[test]
    fn verbosity_accumulates() {
        let cli = Cli::parse_from(["wakelock", "-s", "-vv", "99"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.operation(), Operation::Start);
    }
}
