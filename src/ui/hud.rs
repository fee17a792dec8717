use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::{speed_percent, Theme};
use crate::game::Snapshot;

const SEPARATOR: &str = " │ ";

/// Values shown next to the board that the engine does not own.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    /// Current tick interval.
    pub speed_ms: u64,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD and returns the remaining area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    info: &HudInfo<'_>,
) -> Rect {
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let fields = hud_fields(snapshot, info);
    let compact = line_width(&fields, false) > usize::from(hud_area.width);

    frame.render_widget(
        Paragraph::new(hud_line(&fields, compact, info.theme)).alignment(Alignment::Center),
        hud_area,
    );

    board_area
}

struct HudField {
    label: &'static str,
    short_label: &'static str,
    value: String,
}

fn hud_fields(snapshot: &Snapshot, info: &HudInfo<'_>) -> [HudField; 4] {
    [
        HudField {
            label: "Score",
            short_label: "S",
            value: snapshot.score.to_string(),
        },
        HudField {
            label: "Best",
            short_label: "B",
            value: info.high_score.max(snapshot.score).to_string(),
        },
        HudField {
            label: "Length",
            short_label: "L",
            value: snapshot.cells.len().to_string(),
        },
        HudField {
            label: "Speed",
            short_label: "V",
            value: format!("{}%", speed_percent(info.speed_ms)),
        },
    ]
}

fn label(field: &HudField, compact: bool) -> &'static str {
    if compact {
        field.short_label
    } else {
        field.label
    }
}

fn line_width(fields: &[HudField], compact: bool) -> usize {
    let separators = SEPARATOR.width() * fields.len().saturating_sub(1);
    fields
        .iter()
        .map(|field| label(field, compact).width() + 2 + field.value.width())
        .sum::<usize>()
        + separators
}

fn hud_line(fields: &[HudField], compact: bool, theme: &Theme) -> Line<'static> {
    let label_style = Style::new().fg(theme.hud_label);
    let value_style = Style::new()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(fields.len() * 3);
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, label_style));
        }
        spans.push(Span::styled(format!("{}: ", label(field, compact)), label_style));
        spans.push(Span::styled(field.value.clone(), value_style));
    }

    Line::from(spans)
}
