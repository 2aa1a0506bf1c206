use clap::Parser;
use std::process::ExitCode;

use marquee::cli::Cli;
use marquee::config::Config;
use marquee::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A broken config file is reported by the command that reads it
    let config = Config::load().ok();
    init_tracing(config.as_ref());

    match cli.command.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
