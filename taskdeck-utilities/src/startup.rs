use std::{env, path::Path};

use log::{LevelFilter, info};
use taskdeck_models::errors::SendableError;

use crate::logger::{self, print_env};

/// Common process bootstrap for terminal front-ends: file logging, panic capture, banner.
pub fn startup(name: &str, log_file: &Path, level: LevelFilter) -> Result<(), SendableError> {
    unsafe {
        env::set_var("RUST_BACKTRACE", "1");
    }
    logger::setup_file_logger(log_file, level)?;
    log_panics::init();

    info!("--- {} ---", name);
    print_env()?;

    Ok(())
}
