//! screen-recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use screen_recorder::cli::{
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_devices, run_record, EXIT_ERROR,
};
use screen_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout stays clean for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::ERROR })
        .with_target(false)
        .init();

    let global = cli.global_config();

    match cli.command {
        Commands::Record(args) => run_record(args, global).await,
        Commands::Devices { platform, json } => run_devices(platform, json, global).await,
        Commands::Config { action } => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}
