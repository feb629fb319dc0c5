mod action;
mod app;
mod client;
mod config;
mod error;
mod event;
mod fetch;
mod github;
mod spinner;
mod table;
mod tui;
mod types;
mod ui;
mod unwatch;

use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::client::SubscriptionClient;
use crate::config::{Config, Credentials};
use crate::event::Event;
use crate::github::GitHub;
use crate::tui::EventHandler;

/// Bulk-unwatch the GitHub repositories you receive notifications for.
#[derive(Debug, Parser)]
#[command(name = "gh-unwatch", version, about)]
struct Cli {
    /// Config file (defaults to ~/.config/gh-unwatch/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (defaults to gh-unwatch.log in the user cache directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match real_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn real_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(config::log_path(cli.log_file.as_deref()).as_deref())?;

    let config = Config::load(cli.config.as_deref())?;
    let credentials = Credentials::from_env(&config)?;
    let github = GitHub::new(&config, &credentials)?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(Arc::new(github), config.tick_rate()).await;

    tui::restore()?;

    result
}

/// Logs never go to stderr: the terminal is in the alternate screen while
/// the session runs.
fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let writer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            BoxMakeWriter::new(Mutex::new(File::create(path)?))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Ok(())
}

async fn run(
    client: Arc<dyn SubscriptionClient>,
    tick_rate: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(client, action_tx.clone());

    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
