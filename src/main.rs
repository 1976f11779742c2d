use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use risk_map::app::App;
use risk_map::config::{AppConfig, Cli};
use risk_map::{data, ui};
use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = AppConfig::try_from(Cli::parse())?;

    // The terminal belongs to the map, so logs go to a file
    if let Err(err) = init_logging(&config) {
        eprintln!("logging disabled: {err:#}");
    }
    info!(?config, "starting");

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, config);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

/// Handle mouse events for clicking, panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Always track mouse position for cursor marker
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        // Scroll wheel zooms towards the mouse position
        MouseEventKind::ScrollUp => app.zoom_at(mouse.column, mouse.row, true),
        MouseEventKind::ScrollDown => app.zoom_at(mouse.column, mouse.row, false),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        // Click selects a marker, drag pans
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(mouse.column, mouse.row),
        _ => {}
    }
}

fn handle_key(app: &mut App, code: KeyCode) {
    // Detail view only listens for the way back
    if app.detail.is_some() {
        match code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => app.close_detail(),
            KeyCode::Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Focus a key risk
        KeyCode::Char(c @ '1'..='9') => app.focus_index(c as usize - '1' as usize),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Enter => app.open_focused_detail(),

        // Pan with hjkl or arrow keys
        KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
        KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
        KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
        KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

        // Layer toggles
        KeyCode::Char('t') | KeyCode::Char('T') => app.map_renderer.toggle_routes(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.map_renderer.toggle_coastlines(),
        KeyCode::Char('L') => app.map_renderer.toggle_labels(),

        // Reset view
        KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, config: AppConfig) -> Result<()> {
    let size = terminal.size()?;
    let data_dir = config.data_dir.clone();
    let mut app = App::new(config, size.width, size.height);

    // Load all available GeoJSON data at different resolutions
    if data_dir.exists() {
        if let Err(err) = data::load_all_geojson(&mut app.map_renderer, &data_dir) {
            warn!("basemap load failed: {err:#}");
        }
    }

    // Fall back to simple world if no data loaded
    if !app.map_renderer.has_data() {
        info!("no basemap data, using built-in outline");
        data::generate_simple_world(&mut app.map_renderer);
    }

    // Main loop
    loop {
        app.sync();
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key.code),
                Event::Mouse(mouse) => {
                    // Mouse does nothing on the detail page
                    if app.detail.is_none() {
                        handle_mouse(&mut app, mouse);
                    }
                }
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            info!("quit");
            break;
        }
    }

    Ok(())
}
