//! edopro-update CLI
//!
//! Thin entry point: parses arguments, sets up logging, runs one update
//! pass, and maps the outcome to a process exit code.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use edopro_update::update::DEFAULT_DEPS_PATH;
use edopro_update::{GitHubClient, Updater};

#[derive(Parser)]
#[command(name = "edopro-update")]
#[command(about = "Dependency pin updater for the EDOPro package", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the generated deps.nix pin file
    #[arg(long, default_value = DEFAULT_DEPS_PATH)]
    deps_path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let updater = Updater::new(GitHubClient::new(), cli.deps_path);

    if let Err(e) = updater.run().await {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
