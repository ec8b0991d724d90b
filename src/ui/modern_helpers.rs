use crate::countdown::Locale;
use crate::schedule::{ExamEvent, Schedule};
use crate::state::Update;
use crate::text_utils::wrap_text;
use crate::ui::styles::{ScheduleStyles, accent_color};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use std::error::Error;

const RULE: &str = "────────";

fn styled_lines(text: &str, width: usize, style: Style) -> impl Iterator<Item = Line<'static>> {
    wrap_text(text, width)
        .into_iter()
        .map(move |l| Line::from(Span::styled(l, style)))
}

fn header_lines(schedule: &Schedule, width: usize, styles: &ScheduleStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.extend(styled_lines(&schedule.headline, width, styles.headline));
    lines.extend(styled_lines(&schedule.subtitle, width, styles.subtitle));
    if !schedule.notice.is_empty() {
        lines.push(Line::default());
        lines.extend(styled_lines(&schedule.notice, width, styles.notice));
    }
    lines.push(Line::default());
    lines
}

/// Lines for one event card: title bar, calendar labels, category,
/// description, required parts and the countdown.
pub fn card_lines(
    event: &ExamEvent,
    index: usize,
    schedule: &Schedule,
    update: Option<&Update>,
    locale: Locale,
    width: usize,
    styles: &ScheduleStyles,
) -> Vec<Line<'static>> {
    let accent = Style::default()
        .fg(accent_color(&event.accent))
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("{RULE} "), accent),
        Span::styled(event.title.clone(), accent),
        Span::styled(format!(" {RULE}"), accent),
    ]));
    if let Some(labels) = schedule.labels_for(index) {
        lines.extend(styled_lines(&labels.hijri, width, styles.text));
        lines.extend(styled_lines(&labels.gregorian, width, styles.muted));
    }
    let tag = match (event.category.is_empty(), event.day.is_empty()) {
        (false, false) => format!("[{}] {}", event.category, event.day),
        (false, true) => format!("[{}]", event.category),
        (true, false) => event.day.clone(),
        (true, true) => String::new(),
    };
    if !tag.is_empty() {
        lines.push(Line::from(Span::styled(tag, accent)));
    }
    lines.extend(styled_lines(&event.description, width, styles.text));

    if !event.parts.is_empty() {
        lines.push(Line::from(Span::styled(
            locale.parts_heading().to_string(),
            styles.heading,
        )));
        lines.extend(styled_lines(&event.parts.join("  •  "), width, styles.part));
    }

    let countdown = update.and_then(|u| u.state.get(event.id));
    let label = countdown
        .map(|c| c.label.clone())
        .unwrap_or_else(|| locale.pending_label().to_string());
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", locale.remaining_heading()), styles.heading),
        Span::styled(label, styles.urgency(countdown.map(|c| c.urgency))),
    ]));
    lines.push(Line::default());
    lines
}

fn footer_lines(schedule: &Schedule, width: usize, styles: &ScheduleStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if !schedule.notes.is_empty() {
        lines.extend(styled_lines(&schedule.notes_heading, width, styles.heading));
        for note in &schedule.notes {
            lines.extend(styled_lines(&format!("› {note}"), width, styles.notes));
        }
        lines.push(Line::default());
    }
    if let Some(verse) = &schedule.verse {
        lines.extend(styled_lines(&format!("\"{}\"", verse.text), width, styles.verse));
        lines.extend(styled_lines(&verse.source, width, styles.muted));
    }
    lines
}

/// The whole page as a flat list of lines, ready to be scrolled.
pub fn schedule_lines(
    schedule: &Schedule,
    update: Option<&Update>,
    locale: Locale,
    width: usize,
    styles: &ScheduleStyles,
) -> Vec<Line<'static>> {
    let mut lines = header_lines(schedule, width, styles);
    for (index, event) in schedule.events.iter().enumerate() {
        lines.extend(card_lines(event, index, schedule, update, locale, width, styles));
    }
    lines.extend(footer_lines(schedule, width, styles));
    lines
}

/// Draw the schedule. `scroll` is clamped to the content height and written
/// back so key handling never scrolls past the end.
pub fn draw_schedule<B: Backend>(
    terminal: &mut Terminal<B>,
    schedule: &Schedule,
    update: Option<&Update>,
    locale: Locale,
    styles: &ScheduleStyles,
    scroll: &mut u16,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    terminal
        .draw(|f| {
            let area = f.area();
            // Two columns for the borders.
            let width = usize::from(area.width.saturating_sub(2)).max(1);
            let height = usize::from(area.height.saturating_sub(2));
            let lines = schedule_lines(schedule, update, locale, width, styles);
            let max_scroll = u16::try_from(lines.len().saturating_sub(height)).unwrap_or(u16::MAX);
            *scroll = (*scroll).min(max_scroll);

            let paragraph = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center)
                .scroll((*scroll, 0));
            f.render_widget(paragraph, area);
        })
        .map_err(|e| Box::new(e) as Box<dyn Error + Send + Sync>)?;
    Ok(())
}
