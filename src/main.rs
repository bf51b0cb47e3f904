use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use playlist_rs::config::{Cli, Config};
use playlist_rs::controller::AppController;
use playlist_rs::logging;
use playlist_rs::model::{AppModel, HttpApiClient};
use playlist_rs::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli).context("Invalid configuration")?;

    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!(api_url = %config.api_url, timeout_secs = config.request_timeout_secs, "=== playlist-rs starting ===");

    let client = HttpApiClient::new(&config.api_url, config.request_timeout())
        .with_context(|| format!("Cannot use backend URL {}", config.api_url))?;
    let api_url = client.base_url().to_string();

    let model = Arc::new(AppModel::new(Arc::new(client), config.request_timeout(), api_url));
    let controller = AppController::new(Arc::clone(&model));

    // Songs for the default genre and the feedback list load while the UI comes up
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.initialize().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("playlist-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> Result<()> {
    loop {
        // Auto-clear old notices (after 5 seconds)
        model.auto_clear_old_notices().await;

        let snapshot = model.snapshot().await;
        terminal.draw(|f| AppView::render(f, &snapshot))?;

        // Short poll so background responses show up promptly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    controller.cancel_requests();

    Ok(())
}
