//! transport_catalogue — command-line entry point.
//!
//! Reads a JSON document from stdin and runs one of two modes:
//!
//! ```text
//! transport_catalogue make_base        < base.json      # writes the snapshot file
//! transport_catalogue process_requests < requests.json  # prints JSON answers
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=info` (or `debug`) for more.

use std::io::{self, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use tc_catalogue::DuplicatePolicy;
use tc_requests::{make_base, process_requests, write_responses, InputDocument};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Load base requests and write the snapshot named in `serialization_settings`.
    #[value(name = "make_base")]
    MakeBase,
    /// Load the snapshot and answer `stat_requests` on stdout.
    #[value(name = "process_requests")]
    ProcessRequests,
}

#[derive(Debug, Parser)]
#[command(name = "transport_catalogue", version, about)]
struct Cli {
    #[arg(value_enum)]
    mode: Mode,

    /// Fail on a repeated stop or bus name instead of replacing the earlier one.
    #[arg(long)]
    reject_duplicates: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let doc = InputDocument::from_reader(BufReader::new(io::stdin().lock()))
        .context("reading input document from stdin")?;

    match cli.mode {
        Mode::MakeBase => {
            let policy = if cli.reject_duplicates {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Overwrite
            };
            make_base(&doc, policy).context("make_base failed")?;
        }
        Mode::ProcessRequests => {
            let responses = process_requests(&doc).context("process_requests failed")?;
            let mut out = BufWriter::new(io::stdout().lock());
            write_responses(&mut out, &responses).context("writing responses")?;
            out.flush().context("writing responses")?;
        }
    }

    info!("finished.");
    Ok(())
}
