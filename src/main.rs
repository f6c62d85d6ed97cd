use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use storygen::api::RelayClient;
use storygen::app::{App, Focus};
use storygen::config;
use storygen::events::AppEvent;
use storygen::ui;

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging() -> Result<()> {
    let log_path = config::get_log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let settings = config::load_config()?;
    info!(relay_url = %settings.relay_url, "starting storygen");
    let client = RelayClient::new(settings.relay_url, settings.request_timeout)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let res = run_app(&mut terminal, &mut app, &client, &tx, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Validate the form and, if it passes, send one request on a background task.
fn submit(app: &mut App, client: &RelayClient, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    let Ok(request) = app.begin_submit() else {
        return;
    };

    let client = client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let event = AppEvent::generate(&client, &request).await;
        let _ = tx.send(event);
    });
}

fn handle_keyboard_input(
    app: &mut App,
    key: KeyCode,
    modifiers: KeyModifiers,
    client: &RelayClient,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match key {
        KeyCode::Char('c') if ctrl => {
            if app.exit_pending {
                app.quit();
            } else {
                app.exit_pending = true;
            }
            return;
        }
        KeyCode::Esc => {
            if app.show_help {
                app.show_help = false;
            } else if app.show_info {
                app.show_info = false;
            } else if app.exit_pending {
                app.exit_pending = false;
            }
            return;
        }
        _ if app.exit_pending => {
            // Any other key cancels pending exit
            app.exit_pending = false;
        }
        _ => {}
    }

    if app.show_help || app.show_info {
        match key {
            KeyCode::Char('h') if ctrl => app.toggle_help(),
            KeyCode::Char('i') if ctrl => app.toggle_info(),
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Char('q') if ctrl => app.quit(),
        KeyCode::Char('h') if ctrl => app.toggle_help(),
        KeyCode::Char('i') if ctrl => app.toggle_info(),
        KeyCode::Char('e') if ctrl => app.next_example(),
        KeyCode::Char('r') if ctrl => app.randomize(),
        KeyCode::Char('x') if ctrl => app.clear_preferences(),

        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Left => app.move_cursor(false),
        KeyCode::Right => app.move_cursor(true),

        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Home => app.scroll_to_top(),
        KeyCode::End => app.scroll_to_bottom(),

        KeyCode::Enter => submit(app, client, event_tx),

        KeyCode::Char(' ') if matches!(app.focus, Focus::Preference(_)) => app.toggle_focused(),
        KeyCode::Backspace if app.focus == Focus::Prompt => app.pop_char(),
        KeyCode::Char(c) if app.focus == Focus::Prompt && !ctrl => {
            app.push_char(c);
        }

        _ => {}
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &RelayClient,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Check for relay outcomes first
        if let Ok(app_event) = event_rx.try_recv() {
            app.handle_event(app_event);
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_keyboard_input(app, key.code, key.modifiers, client, event_tx);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
