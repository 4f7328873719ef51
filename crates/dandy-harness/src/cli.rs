#![forbid(unsafe_code)]

//! Command-line argument parsing for `dandy-replay`.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `DANDY_REPLAY_*` prefix.

use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
dandy-replay: replay page interactions against the Dandy page controller

USAGE:
    dandy-replay --fixture=PATH [OPTIONS]

OPTIONS:
    --fixture=PATH       Page fixture (JSON): nav, regions, promo_form, config
    --script=PATH        Step script (JSON Lines); '-' or absent reads stdin
    --no-follow-scroll   Do not deliver a scroll event after anchor clicks
    --log-json           Emit logs as JSON on stderr
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    DANDY_REPLAY_FIXTURE   Override --fixture
    DANDY_REPLAY_SCRIPT    Override --script
    DANDY_LOG              Log filter (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Opts {
    pub fixture: Option<PathBuf>,
    /// `None` reads the script from stdin.
    pub script: Option<PathBuf>,
    pub follow_scroll: bool,
    pub log_json: bool,
}

/// What the process should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse arguments (without the program name) on top of environment
    /// defaults. Explicit flags override environment variables.
    pub fn parse<I, E>(args: I, env: E) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut opts = Self {
            follow_scroll: true,
            ..Self::default()
        };

        if let Some(val) = env("DANDY_REPLAY_FIXTURE") {
            opts.fixture = Some(val.into());
        }
        if let Some(val) = env("DANDY_REPLAY_SCRIPT") {
            opts.script = script_path(&val);
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--no-follow-scroll" => opts.follow_scroll = false,
                "--log-json" => opts.log_json = true,
                other => {
                    if let Some(val) = other.strip_prefix("--fixture=") {
                        opts.fixture = Some(val.into());
                    } else if let Some(val) = other.strip_prefix("--script=") {
                        opts.script = script_path(val);
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        if opts.fixture.is_none() {
            return Err("missing --fixture".into());
        }
        Ok(Command::Run(opts))
    }
}

fn script_path(val: &str) -> Option<PathBuf> {
    (val != "-" && !val.is_empty()).then(|| val.into())
}
