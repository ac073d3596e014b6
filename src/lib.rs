pub mod cli;
pub mod commands;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use commands::AppState;
use services::config::{ConfigService, ConfigStatus};
use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "INSTANALYTICS_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "HistoricalData";

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .try_init();
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

async fn run_async(args: cli::Args) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir(args.data_dir);
    let config = ConfigService::load(&data_dir);
    if config.status() == ConfigStatus::CorruptConfig {
        log::warn!(
            "Ignoring unreadable {}, using default settings",
            config.config_path().display()
        );
    }

    let state = AppState::new(config)?;
    cli::execute(args.command, &state).await
}

pub fn run() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let args = cli::Args::parse();
    init_logging(args.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(args)) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
