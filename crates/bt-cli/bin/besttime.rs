//! besttime
//!
//! Main entry point.

use anyhow::Result;
use clap::Parser;

use bt_cli::{Args, run};

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides the default filter
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp_secs()
        .try_init();

    run(&args)
}
