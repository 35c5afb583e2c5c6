use std::process;

use clap::Parser;

use grove::cli::Cli;
use grove::styling::eprintln;

fn main() {
    let cli = Cli::parse();

    // --verbose turns on command tracing; RUST_LOG still wins when set.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(e) = cli.run() {
        eprintln!("{e}");
        process::exit(1);
    }
}
