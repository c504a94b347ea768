//! Terminal control panel for a soundbar
//!
//! Usage: `cargo run --example control -- <host> [port]`
//!
//! Set `SOUNDBAR_LOG=<file>` to write library logs to a file.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use samsung_soundbar::{PowerState, SoundbarApi, SoundbarConfig, SoundbarEntity, DEFAULT_PORT};
use std::io;
use std::time::{Duration, Instant};

struct App {
    soundbar: SoundbarEntity,
    scan_interval: Duration,
    last_refresh: Option<Instant>,
    status_message: String,
}

impl App {
    fn new(soundbar: SoundbarEntity, scan_interval: Duration) -> Self {
        Self {
            soundbar,
            scan_interval,
            last_refresh: None,
            status_message: "Connecting...".to_string(),
        }
    }

    fn refresh_due(&self) -> bool {
        self.last_refresh
            .map_or(true, |at| at.elapsed() >= self.scan_interval)
    }

    async fn refresh(&mut self) {
        self.last_refresh = Some(Instant::now());
        match self.soundbar.refresh().await {
            Ok(_) => self.status_message = "Updated".to_string(),
            Err(e) => self.status_message = format!("Refresh failed (showing last known state): {}", e),
        }
    }

    async fn volume_up(&mut self) {
        match self.soundbar.volume_up().await {
            Ok(()) => self.status_message = "Volume up".to_string(),
            Err(e) => self.status_message = format!("Failed to raise volume: {}", e),
        }
        self.refresh().await;
    }

    async fn volume_down(&mut self) {
        match self.soundbar.volume_down().await {
            Ok(()) => self.status_message = "Volume down".to_string(),
            Err(e) => self.status_message = format!("Failed to lower volume: {}", e),
        }
        self.refresh().await;
    }

    async fn toggle_mute(&mut self) {
        let new_mute = !self.soundbar.is_volume_muted();
        match self.soundbar.set_muted(new_mute).await {
            Ok(()) => self.status_message = format!("Mute: {}", if new_mute { "ON" } else { "OFF" }),
            Err(e) => self.status_message = format!("Failed to set mute: {}", e),
        }
        self.refresh().await;
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(3)])
        .split(f.size());

    render_soundbar(f, app, chunks[0]);
    render_status(f, app, chunks[1]);
}

fn render_soundbar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Soundbar (+/- vol, m mute, r refresh, q quit) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let soundbar = &app.soundbar;
    let on = soundbar.state() == PowerState::On;
    let muted = soundbar.is_volume_muted();

    let lines = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(soundbar.name()),
        ]),
        Line::from(vec![
            Span::styled("Endpoint: ", Style::default().fg(Color::Yellow)),
            Span::raw(soundbar.api().endpoint()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Power: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                if on { "ON" } else { "OFF" },
                if on {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ),
        ]),
        Line::from(vec![
            Span::styled("Volume: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                soundbar
                    .volume_level()
                    .map_or("Unknown".to_string(), |v| format!("{:.0}%", v * 100.0)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Mute: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                if muted { "ON" } else { "OFF" },
                if muted {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green)
                },
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let text = Paragraph::new(app.status_message.clone())
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(text, area);
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("SOUNDBAR_LOG") {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let host = args.next().ok_or("usage: control <host> [port]")?;
    let port = match args.next() {
        Some(port) => port.parse()?,
        None => DEFAULT_PORT,
    };
    let config = SoundbarConfig::new(host).with_port(port);

    let http = reqwest::Client::new();
    if !SoundbarApi::test_connection(&http, &config).await {
        println!("Warning: {} did not answer the connection test", config.test_url());
    }
    let soundbar = SoundbarEntity::new(http, &config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(soundbar, config.scan_interval);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if app.refresh_due() {
            app.refresh().await;
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => app.volume_up().await,
                        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => app.volume_down().await,
                        KeyCode::Char('m') => app.toggle_mute().await,
                        KeyCode::Char('r') => app.refresh().await,
                        _ => {}
                    }
                }
            }
        }
    }
}
