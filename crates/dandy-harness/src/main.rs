#![forbid(unsafe_code)]

//! `dandy-replay`: drive the page controller headlessly.
//!
//! ```sh
//! cargo run -p dandy-harness -- --fixture=crates/dandy-harness/fixtures/dandy.json \
//!     --script=crates/dandy-harness/fixtures/tour.jsonl
//! ```
//!
//! Prints one JSON snapshot per step on stdout. Logs go to stderr, filtered
//! by `DANDY_LOG` (default `warn`).

mod cli;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

use dandy_harness::{PageFixture, Replay, ReplayError, ReplayOptions, parse_script, to_jsonl};
use tracing_subscriber::EnvFilter;

use cli::{Command, HELP_TEXT, Opts, VERSION};

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env("DANDY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(opts: &Opts) -> Result<(), ReplayError> {
    let Some(fixture_path) = &opts.fixture else {
        return Ok(());
    };
    let fixture = PageFixture::load(fixture_path)?;
    let steps = match &opts.script {
        Some(path) => parse_script(BufReader::new(File::open(path)?))?,
        None => parse_script(io::stdin().lock())?,
    };
    tracing::info!(steps = steps.len(), fixture = %fixture_path.display(), "replaying");

    let mut replay = Replay::new(
        &fixture,
        ReplayOptions {
            follow_scroll: opts.follow_scroll,
        },
    );
    let snapshots = replay.run(&steps)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(to_jsonl(&snapshots)?.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    let opts = match Opts::parse(std::env::args().skip(1), |key| std::env::var(key).ok()) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            return;
        }
        Ok(Command::Version) => {
            println!("dandy-replay {VERSION}");
            return;
        }
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };

    init_logging(opts.log_json);

    if let Err(err) = run(&opts) {
        tracing::error!(%err, "replay failed");
        eprintln!("dandy-replay: {err}");
        process::exit(1);
    }
}
