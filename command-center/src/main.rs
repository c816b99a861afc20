mod clipboard;
mod config;
mod form;
mod format;
mod history;
mod notify;
mod shell;
mod task_list;
mod ui;
mod worker;

#[cfg(test)]
mod testing;

use std::{
    io,
    sync::mpsc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use taskdeck_api::{BlockingApiClient, StaticLocator};

use config::Config;
use shell::Shell;
use worker::{spawn_request, Msg, Request};

type ApiClient = BlockingApiClient<StaticLocator>;

fn main() -> Result<()> {
    let config = Config::parse();
    taskdeck_utilities::startup::startup("Command Center", &config.log_file, config.log_level)
        .map_err(|err| anyhow!(err))?;
    info!("Using task API at {}", config.api_url);

    let api = ApiClient::new(StaticLocator::new(config.api_url.clone()), config.timeout())?;

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config, api);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    if let Err(err) = &result {
        error!("Command center exited with error: {err:#}");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
    api: ApiClient,
) -> Result<()> {
    // Background workers report back on this channel.
    let (tx, rx) = mpsc::channel::<Msg>();
    let dispatch = |requests: Vec<Request>| {
        for request in requests {
            spawn_request(tx.clone(), api.clone(), request);
        }
    };

    let mut shell = Shell::new(config.api_url.clone(), config.page_size);
    dispatch(shell.start());

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, &shell))?;
        if let Some(text) = shell.take_clipboard() {
            clipboard::copy(&mut io::stdout(), &text)?;
        }
        if shell.should_quit() {
            break;
        }

        while let Ok(msg) = rx.try_recv() {
            dispatch(shell.apply(msg, Instant::now()));
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    dispatch(shell.handle_key(key, Instant::now()));
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            shell.tick(last_tick);
        }
    }

    info!("Command center shutting down");
    Ok(())
}
