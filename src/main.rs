// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod config;
mod data;
mod error;
mod events;
mod source;
mod ui;

use app::{App, View};
use config::AppConfig;
use data::{now_ms, AquariumStore, Parameter, Reading};
use source::{ReadingSource, SimulatedSource};

#[derive(Parser, Debug)]
#[command(name = "aquawatch")]
#[command(about = "Terminal dashboard for aquarium water quality and filter maintenance")]
struct Args {
    /// TOML configuration file (aquarium settings, tick, seed)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds between simulated readings (overrides config)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,

    /// Seed for the reading simulator (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Parameter selected on the dashboard at startup
    #[arg(short, long, default_value = "temperature")]
    parameter: Parameter,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export current state to JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    if let Some(ref path) = args.log_file {
        init_logging(path, &config.log_filter)?;
    }

    let mut store = AquariumStore::new(config.aquarium.clone())
        .context("invalid aquarium settings")?;
    let initial = Reading::baseline(now_ms());
    store.ingest(initial)?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&store, &export_path);
    }

    run_with_simulator(store, initial, &config, args.parameter)
}

/// Install a file-backed tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter when set.
fn init_logging(path: &Path, filter: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Run with the simulated reading source
fn run_with_simulator(
    store: AquariumStore,
    initial: Reading,
    config: &AppConfig,
    parameter: Parameter,
) -> Result<()> {
    // Build a tokio runtime for the simulator task
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        SimulatedSource::spawn(config.tick(), config.seed, initial)
    });
    info!(tick_ms = config.tick_ms, seed = ?config.seed, "starting dashboard");

    let mut app = App::new(Box::new(source), store);
    app.selected_parameter = parameter;

    // Run the TUI in the main thread while the runtime drives the simulator
    let result = run_tui(&mut app);

    // Stop the timer before the runtime goes away
    app.shutdown();
    rt.shutdown_timeout(Duration::from_millis(100));

    result
}

/// Run the TUI for the given app
fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 70;
    const MIN_HEIGHT: u16 = 24;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5u16.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(12),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Dashboard => ui::dashboard::render(frame, app, chunks[2]),
                View::Maintenance => ui::maintenance::render(frame, app, chunks[2]),
                View::Reports => ui::reports::render(frame, app, chunks[2]),
                View::Aquarium => ui::aquarium::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            // Overlays
            if app.catalog_picker.is_some() {
                ui::maintenance::render_catalog_picker(frame, app, area);
            }
            if app.input.is_some() {
                ui::common::render_input(frame, app, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // New readings arrive from the simulator task
        app.reload_data();
    }

    Ok(())
}

/// Export the current state to a JSON file
fn export_to_file(store: &AquariumStore, export_path: &Path) -> Result<()> {
    app::export_to_path(store, export_path, now_ms())?;
    println!("Exported aquarium state to: {}", export_path.display());
    Ok(())
}
