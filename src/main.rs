use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use vehicle_ledger::args::{Args, Command};
use vehicle_ledger::{commands, Config, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::List(list_args) => commands::list(Config::load(home).await?, list_args.clone())
            .await?
            .print(),

        Command::Stats => commands::stats(Config::load(home).await?).await?.print(),

        Command::Convert(convert_args) => {
            commands::convert(Config::load(home).await?, convert_args.clone())
                .await?
                .print()
        }

        Command::Export(export_args) => {
            commands::export(Config::load(home).await?, export_args.clone())
                .await?
                .print()
        }

        Command::Options(options_args) => {
            commands::options(Config::load(home).await?, options_args.clone())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "vehicle_ledger={},{}={}",
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
