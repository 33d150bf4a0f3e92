use clap::builder::Resettable;
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches};
use std::ffi::OsString;

use crate::display::DEFAULT_BAR_WIDTH;

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about = "Context-window statusline for Claude Code")]
pub struct Args {
    /// Emit a JSON object instead of colored text
    #[arg(long)]
    pub json: bool,

    /// Number of cells in the usage bar
    #[arg(long, env = "STATUSLINE_BAR_WIDTH", default_value_t = DEFAULT_BAR_WIDTH)]
    pub bar_width: usize,

    /// Give up on the git branch query after this many milliseconds
    #[arg(long, env = "STATUSLINE_GIT_TIMEOUT_MS", default_value_t = 1000)]
    pub git_timeout_ms: u64,

    /// Skip the git branch segment entirely
    #[arg(long, env = "STATUSLINE_NO_GIT")]
    pub no_git: bool,

    /// Debug mode: print derived values to stderr
    #[arg(long, env = "STATUSLINE_DEBUG")]
    pub debug: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            json: false,
            bar_width: DEFAULT_BAR_WIDTH,
            git_timeout_ms: 1000,
            no_git: false,
            debug: false,
        }
    }
}

impl Args {
    /// Parse the process arguments. `--help` and `--version` print and exit 0.
    /// If an env value is rejected, the command line is parsed on its own;
    /// if the command line itself is rejected, defaults are used but `--json`
    /// is still honored so the host gets the format it asked for.
    pub fn parse() -> Self {
        Self::parse_from_or_default(std::env::args_os())
    }

    pub fn parse_from_or_default<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        match <Args as clap::Parser>::try_parse_from(argv.iter().cloned()) {
            Ok(args) => args,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(_) => Self::parse_ignoring_env(&argv).unwrap_or_else(|| Args {
                json: argv.iter().skip(1).any(|a| a == "--json"),
                ..Args::default()
            }),
        }
    }

    fn parse_ignoring_env(argv: &[OsString]) -> Option<Self> {
        let matches = <Args as CommandFactory>::command()
            .mut_args(|arg| arg.env(Resettable::Reset))
            .try_get_matches_from(argv.iter().cloned())
            .ok()?;
        <Args as FromArgMatches>::from_arg_matches(&matches).ok()
    }

    pub fn git_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.git_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags() {
        let args = Args::parse_from_or_default([
            "context_statusline",
            "--json",
            "--bar-width",
            "20",
            "--git-timeout-ms",
            "250",
            "--no-git",
        ]);
        assert!(args.json);
        assert!(args.no_git);
        assert_eq!(args.bar_width, 20);
        assert_eq!(args.git_timeout(), std::time::Duration::from_millis(250));
    }

    #[test]
    fn unknown_flag_falls_back_to_defaults() {
        let args = Args::parse_from_or_default(["context_statusline", "--bogus"]);
        assert_eq!(args, Args::default());

        let args = Args::parse_from_or_default(["context_statusline", "--bar-width", "wide"]);
        assert_eq!(args.bar_width, DEFAULT_BAR_WIDTH);
    }

    #[test]
    fn json_survives_a_rejected_command_line() {
        let args = Args::parse_from_or_default([
            "context_statusline",
            "--json",
            "--bar-width",
            "wide",
        ]);
        assert!(args.json);
        assert_eq!(args.bar_width, DEFAULT_BAR_WIDTH);
    }

    #[test]
    fn command_line_parses_without_env_sources() {
        let argv: Vec<OsString> = ["context_statusline", "--json", "--bar-width", "9"]
            .into_iter()
            .map(OsString::from)
            .collect();
        let args = Args::parse_ignoring_env(&argv).unwrap();
        assert!(args.json);
        assert_eq!(args.bar_width, 9);
        assert!(!args.no_git);
    }
}
