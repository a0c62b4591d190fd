#![windows_subsystem = "windows"]

mod config;
mod driver;
mod error;
mod install_list;
mod java;

use crate::config::Config;
use crate::driver::Driver;
use common::process::SystemRunner;
use common::registry::SystemRegistry;
use std::process::ExitCode;
use tracing::{Level, debug, error, warn};

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            common::logging::init(Level::WARN);
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let level = common::logging::parse_level(&config.logging.level);
    common::logging::init(level.unwrap_or(Level::WARN));
    if level.is_none() {
        warn!("Unknown log level {:?}, using warn", config.logging.level);
    }

    let mut driver = Driver::new(&config, SystemRegistry::local_machine(), SystemRunner);
    let result = driver.run();
    debug!("Finished: {}", driver.phase());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
