use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, PROMPT_WARN_CHARS};
use crate::models::MAX_PROMPT_CHARS;
use crate::preferences::PreferenceKind;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    Rect {
        x: area.x + x,
        y: area.y + y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled(
            "Storygen - Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("General:", bold)),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+I        - Show/hide session stats"),
        Line::from("  Ctrl+Q        - Quit application"),
        Line::from("  Ctrl+C        - Quit (press twice)"),
        Line::from(""),
        Line::from(Span::styled("Form:", bold)),
        Line::from("  Tab/Shift+Tab - Move between prompt and panels"),
        Line::from("  Left/Right    - Highlight an option"),
        Line::from("  Space         - Select/deselect option"),
        Line::from("  Enter         - Generate story"),
        Line::from("  Ctrl+E        - Insert an example prompt"),
        Line::from("  Ctrl+R        - Randomize preferences"),
        Line::from("  Ctrl+X        - Clear all preferences"),
        Line::from(""),
        Line::from(Span::styled("Story:", bold)),
        Line::from("  Up/Down       - Scroll"),
        Line::from("  PgUp/PgDn     - Scroll by page"),
        Line::from("  Home/End      - Jump to start/end"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    let popup_area = centered(area, 60, 26);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}

pub fn render_info_window(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.analytics;

    let info_text = vec![
        Line::from(Span::styled(
            "Session Stats",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Stories Generated: "),
            Span::styled(
                stats.stories_generated.to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::raw("Average Length: "),
            Span::styled(
                format!("{} chars", stats.average_length),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::raw("Last Genre: "),
            Span::styled(stats.genre_label(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("Last Generated: "),
            Span::styled(
                stats.last_generated_label(),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+I to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let info_paragraph = Paragraph::new(info_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Info ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    let popup_area = centered(area, 44, 10);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(info_paragraph, popup_area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "Enter: Generate | Tab: Focus | Space: Select | Ctrl+R: Random | Ctrl+X: Clear | Ctrl+H: Help",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(
        "Deranged Story Generator",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    );

    let status = if app.is_loading {
        Span::styled(
            "  Crafting Story...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if app.can_submit() {
        Span::styled("  Ready", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            "  Enter a prompt or pick preferences",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(Line::from(vec![title, status])), area);
}

pub fn render_error_line(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(error) = &app.error {
        let line = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        frame.render_widget(line, area);
    }
}

pub fn render_prompt_field(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Prompt;
    let count = app.char_count();

    let counter_style = if count > PROMPT_WARN_CHARS {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };
    let counter = Line::from(Span::styled(
        format!(" {count}/{MAX_PROMPT_CHARS} "),
        counter_style,
    ))
    .right_aligned();

    let (text, style) = if app.prompt.is_empty() {
        (
            "Describe your story idea here... (Ctrl+E for an example)",
            Style::default().fg(Color::Gray),
        )
    } else {
        (
            app.prompt.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Story Prompt ")
                .title_top(counter)
                .border_style(focus_style(focused)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(input, area);
}

fn preference_line(app: &App, kind: PreferenceKind) -> Line<'static> {
    let focused = app.focus == Focus::Preference(kind);
    let choice = app.preferences.get(kind);

    let mut spans = vec![Span::styled(
        format!("{:<8}", kind.label()),
        focus_style(focused).add_modifier(Modifier::BOLD),
    )];

    for (index, option) in kind.options().iter().enumerate() {
        let selected = choice.is(option);
        let highlighted = focused && app.cursor(kind) == index;

        let mut style = if selected {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if highlighted {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let marker = if selected { "✓" } else { " " };
        spans.push(Span::styled(format!("{marker}{option}"), style));
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

pub fn render_preferences(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = PreferenceKind::ALL
        .iter()
        .map(|kind| preference_line(app, *kind))
        .collect();

    let any_focused = matches!(app.focus, Focus::Preference(_));
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Story Preferences ")
                .border_style(focus_style(any_focused)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(panel, area);
}

pub fn render_story(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();

    if let Some(instruction) = &app.last_instruction {
        lines.push(Line::from(Span::styled(
            format!("Prompt: {instruction}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    if app.story.is_empty() {
        lines.push(Line::from(Span::styled(
            "Your story will appear here.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(app.story.lines().map(|l| Line::from(l.to_string())));
    }

    // Borders take two columns and two rows
    let available_width = (area.width as usize).saturating_sub(2).max(1);
    let total_visual_lines: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(available_width).max(1))
        .sum();

    let visible_height = (area.height as usize).saturating_sub(2);
    let max_scroll = total_visual_lines.saturating_sub(visible_height);
    let actual_scroll = app.scroll_offset.min(max_scroll);

    // Sync the clamped scroll back to the app state
    if app.scroll_offset != actual_scroll {
        app.scroll_offset = actual_scroll;
    }

    let story = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Your Story ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(actual_scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(story, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered(area, 60, 26);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 10);

        let popup = centered(Rect::new(0, 0, 100, 50), 40, 10);
        assert_eq!((popup.x, popup.y), (30, 20));
    }

    #[test]
    fn test_selected_option_is_marked() {
        let mut app = App::new();
        app.toggle(PreferenceKind::Mood, "Dark");
        let line = preference_line(&app, PreferenceKind::Mood);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("✓Dark"));
        assert!(text.contains(" Sad"));
    }
}
