mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod preview;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::AppConfig;
use crate::event::{BootPayload, Event, EventHandler};
use crate::fs::backend;
use crate::fs::local::LocalBackend;
use crate::tui::{install_panic_hook, Tui};

/// A keyboard-driven drive and directory browser TUI with image preview.
#[derive(Parser, Debug)]
#[command(name = "file_browser_tui", version, about)]
struct Cli {
    /// Root directories to browse as drives (defaults to platform drives)
    roots: Vec<PathBuf>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color scheme: "dark", "light", or "custom"
    #[arg(long)]
    theme: Option<String>,

    /// Disable the image preview pane
    #[arg(long)]
    no_preview: bool,

    /// Disable file logging
    #[arg(long)]
    no_log: bool,
}

impl Cli {
    /// Partial config derived from the flags, merged in at top priority.
    fn overrides(&self) -> AppConfig {
        let mut over = AppConfig::default();
        over.theme.scheme = self.theme.clone();
        if self.no_preview {
            over.preview.enabled = Some(false);
        }
        if self.no_log {
            over.logging.enabled = Some(false);
        }
        over
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    let _log_guard = logging::init(&config);
    let theme = theme::resolve_theme(&config.theme);

    let backend = if cli.roots.is_empty() {
        LocalBackend::detect()?
    } else {
        LocalBackend::with_roots(cli.roots.clone())?
    };
    let drives = backend.drive_names();

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(16));
    let event_tx = events.sender();

    let bridge = backend::spawn(backend, event_tx.clone());
    let mut app = App::new(&config, bridge, event_tx.clone());

    // Startup handshake: drives are enumerated, navigation may begin.
    let _ = event_tx.send(Event::Boot(BootPayload { drives }));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, &theme, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => {}
            Event::Resize(_, _) => {}
            Event::Boot(payload) => app.init(payload),
            Event::Nav(response) => app.handle_nav(response),
            Event::Preview(done) => app.handle_preview(done),
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
