mod app;
mod browser;
mod config;
mod modals;
mod paths;
mod toolbar;
mod ui;

use std::fs::File;

use log::{LevelFilter, info};
use nbconnect_lib::ConnectClient;
use simplelog::{Config as LogConfig, WriteLogger};

use crate::app::App;
use crate::browser::SystemBrowser;
use crate::config::Config;

#[tokio::main]
async fn main() {
    init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "starting with base url {} and timeout {:?}",
        config.base_url, config.request_timeout
    );

    let client = ConnectClient::builder()
        .base_url(&config.base_url)
        .timeout(config.request_timeout)
        .build();
    let windows = SystemBrowser::new(config.base_url.clone());

    if let Err(e) = App::new(client, windows).run().await {
        eprintln!("Error: {e}");
    }
}

/// Logs go to a rotated file in the cache directory; the terminal itself is
/// taken over by the UI. Running without a resolvable home directory just
/// means no logs.
fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, LogConfig::default(), file);
    }
}
