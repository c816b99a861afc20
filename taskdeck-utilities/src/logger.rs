use std::{env, path::Path, time::SystemTime};

use log::{LevelFilter, info};
use taskdeck_models::errors::SendableError;

fn dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
}

/// Logs only to `path`; for programs that own the terminal.
pub fn setup_file_logger(path: &Path, level: LevelFilter) -> Result<(), SendableError> {
    dispatch(level).chain(fern::log_file(path)?).apply()?;
    Ok(())
}

pub fn print_env() -> std::io::Result<()> {
    let path = env::current_dir()?;
    info!("The current directory is {}", path.display());
    Ok(())
}
