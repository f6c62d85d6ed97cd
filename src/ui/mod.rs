pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Rows used by the preference panel: one per category plus borders.
const PREFERENCES_HEIGHT: u16 = 2 + 2 * 6;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Title + status
            Constraint::Length(1),                  // Error line
            Constraint::Length(6),                  // Prompt box
            Constraint::Length(PREFERENCES_HEIGHT), // Preference panels
            Constraint::Min(0),                     // Story
            Constraint::Length(1),                  // Bottom keymap bar
        ])
        .split(frame.area());

    widgets::render_status_bar(frame, app, chunks[0]);
    widgets::render_error_line(frame, app, chunks[1]);
    widgets::render_prompt_field(frame, app, chunks[2]);
    widgets::render_preferences(frame, app, chunks[3]);
    widgets::render_story(frame, app, chunks[4]);
    widgets::render_bottom_bar(frame, app, chunks[5]);

    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }

    if app.show_info {
        widgets::render_info_window(frame, app, frame.area());
    }
}
