use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Theme;

/// Draws the idle screen shown after startup and every reset.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, theme: &Theme) {
    let lines = vec![
        title_line("SNAKE", theme),
        Line::from(format!("Best: {high_score}")),
        Line::from(""),
        Line::from("[Space] Start"),
        footer_line("Arrows/WASD steer", theme),
    ];
    render_popup(frame, area, " start ", lines);
}

/// Draws the pause screen.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        title_line("PAUSED", theme),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[R] Reset"),
        footer_line("[+/-] Speed  [Q] Quit", theme),
    ];
    render_popup(frame, area, " pause ", lines);
}

/// Draws the game-over screen.
///
/// `high_score` is the tracker's best, which already includes this run.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    theme: &Theme,
) {
    let lines = vec![
        title_line("GAME OVER", theme),
        Line::from(format!("Score: {score}")),
        Line::from(format!("Best: {high_score}")),
        Line::from(""),
        footer_line("[R] Reset  [Q] Quit", theme),
    ];
    render_popup(frame, area, " game over ", lines);
}

fn title_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::styled(
        text,
        Style::new()
            .fg(theme.menu_title)
            .add_modifier(Modifier::BOLD),
    )
}

fn footer_line(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::styled(text, Style::new().fg(theme.menu_footer))
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &'static str, lines: Vec<Line<'static>>) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = u16::try_from(content_width)
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let popup = centered_popup(area, width, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    center
}
