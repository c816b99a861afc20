use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::LevelFilter;
use taskdeck_api::{API_URL_ENV, DEFAULT_API_URL};

use crate::task_list::DEFAULT_PAGE_SIZE;

#[derive(Parser, Debug, Clone)]
#[command(name = "command-center", about = "Terminal dashboard for the task management API")]
pub struct Config {
    /// Base URL of the task API.
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// The terminal belongs to the UI, so logs only go here.
    #[arg(long, default_value = "command-center.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
