use std::process::ExitCode;

use clap::Parser;
use wallet_tracker::cli::{handlers, output, Cli};

fn main() -> ExitCode {
    wallet_tracker::init();
    let cli = Cli::parse();

    match handlers::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            output::error(&err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
