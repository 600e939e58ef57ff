//! LiquidDoc - Entry Point
//!
//! Opens the configured store and runs the console on stdin/stdout.

use env_logger::Env;
use log::{error, info};
use tokio::io::{BufReader, stdin, stdout};

use liquiddoc::config::AppConfig;
use liquiddoc::console::{Console, run_console};
use liquiddoc::error::handlers::handle_error;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str())).init();

    info!("Opening {:?} store at {}", config.backend, config.store_dir);
    let store = match config.open_store() {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let mut console = Console::new(store);
    if let Err(e) = run_console(
        &mut console,
        BufReader::new(stdin()),
        stdout(),
        config.max_command_length,
    )
    .await
    {
        handle_error(&e);
        std::process::exit(1);
    }

    info!("LiquidDoc exiting");
}
