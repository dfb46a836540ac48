use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use vendord::app::App;
use vendord::cli::Cli;
use vendord::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // A missing file at the default path just means "run with defaults";
    // an unreadable or invalid file is still fatal.
    let mut config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    config.init_logging();
    info!("vendord starting");

    tokio::select! {
        result = App::run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("vendord stopped");
}
