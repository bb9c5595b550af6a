// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The year at a glance: one row of dots per month.

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Gauge;
use unicode_width::UnicodeWidthStr;
use yearmark_core::{DayCell, DayStatus, format_display_date};

use crate::tui::app_store::AppStore;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, CursorMove, Dispatcher};
use crate::util::parse_hex_color;

const MONTH_LABEL_WIDTH: u16 = 4;
const CELL_WIDTH: u16 = 2;
const ROW_WIDTH: u16 = MONTH_LABEL_WIDTH + 31 * CELL_WIDTH;

const GLYPH_DAY: &str = "●";
const GLYPH_TODAY: &str = "◉";
const GLYPH_NOTE: &str = "·";

const EMPTY_HINT: &str = "No marked days yet. Press Enter on a day to add a color, emoji or note.";

pub struct GridView;

impl GridView {
    pub fn new() -> Self {
        Self
    }

    fn layout(area: Rect) -> [Rect; 8] {
        Layout::vertical([
            Constraint::Length(1),  // title
            Constraint::Length(1),  // gauge
            Constraint::Length(1),  // spacer
            Constraint::Length(12), // months
            Constraint::Length(1),  // spacer
            Constraint::Length(1),  // day details or empty hint
            Constraint::Min(0),
            Constraint::Length(2), // status + help
        ])
        .margin(1)
        .areas(area)
    }
}

impl Component<AppStore> for GridView {
    fn render(&self, store: &RefCell<AppStore>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let grid = store.core.grid();
        let accent = accent_color(&store);
        let [title, gauge, _, months, _, details, _, footer] = Self::layout(area);
        let progress = grid.progress();

        Line::from(vec![
            format!("{} ", grid.year()).bold().fg(accent),
            format!(
                " {} days left · {}%",
                progress.days_remaining,
                progress.percentage_text()
            )
            .into(),
        ])
        .centered()
        .render(title, buf);

        let gauge_area = centered_width(gauge, ROW_WIDTH);
        Gauge::default()
            .gauge_style(Style::new().fg(accent))
            .ratio((progress.percentage / 100.0).clamp(0.0, 1.0))
            .label(format!("{}%", progress.percentage_text()))
            .render(gauge_area, buf);

        let months_area = centered_width(months, ROW_WIDTH);
        for (i, month) in grid.months().iter().enumerate() {
            let row = Rect::new(months_area.x, months_area.y + i as u16, months_area.width, 1);
            if row.y >= months_area.bottom() {
                break;
            }

            let mut spans = vec![Span::raw(format!("{:<4}", &month.name[..3])).dark_gray()];
            for cell in &month.days {
                spans.extend(cell_spans(cell, cell.day == store.cursor, accent));
            }
            Line::from(spans).render(row, buf);
        }

        let details_line = if grid.has_marks() {
            day_details(&store)
        } else {
            Line::from(EMPTY_HINT.dark_gray().italic())
        };
        details_line.centered().render(details, buf);

        let [status, help] = Layout::vertical([Constraint::Length(1); 2]).areas(footer);
        if let Some(line) = status_line(&store) {
            line.centered().render(status, buf);
        }
        instructions().centered().render(help, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let action = match event.code {
            KeyCode::Left | KeyCode::Char('h') => Action::MoveCursor(CursorMove::Left),
            KeyCode::Right | KeyCode::Char('l') => Action::MoveCursor(CursorMove::Right),
            KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor(CursorMove::Up),
            KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor(CursorMove::Down),
            KeyCode::Enter => Action::OpenEditor,
            KeyCode::Char('t') => Action::JumpToToday,
            KeyCode::Char('s') => Action::OpenSettings,
            KeyCode::Char('[') => Action::SelectYear(store.borrow().core.year() - 1),
            KeyCode::Char(']') => Action::SelectYear(store.borrow().core.year() + 1),
            KeyCode::Char('q') | KeyCode::Esc => return Some(Message::Exit),
            _ => return None,
        };
        dispatcher.dispatch(action);
        Some(Message::Handled)
    }
}

/// The two columns of one day.
fn cell_spans(cell: &DayCell, cursor: bool, accent: Color) -> Vec<Span<'static>> {
    let mut style = Style::new().fg(if cell.weekend { Color::Gray } else { accent });
    match cell.status {
        DayStatus::Past => style = style.add_modifier(Modifier::DIM),
        DayStatus::Today => style = style.add_modifier(Modifier::BOLD),
        DayStatus::Upcoming => {}
    }
    if cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let glyph = match cell.status {
        DayStatus::Today => GLYPH_TODAY,
        _ => GLYPH_DAY,
    };

    let Some(mark) = &cell.mark else {
        return vec![Span::styled(glyph, style), Span::raw(" ")];
    };

    if let Some(emoji) = &mark.emoji {
        let mut style = style.fg(Color::Reset).remove_modifier(Modifier::DIM);
        if mark.has_note {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let pad = (CELL_WIDTH as usize).saturating_sub(emoji.width());
        return vec![Span::styled(emoji.clone(), style), Span::raw(" ".repeat(pad))];
    }

    if let Some(color) = mark.color.as_deref().and_then(parse_hex_color) {
        style = style.fg(color).remove_modifier(Modifier::DIM);
    }
    let note = if mark.has_note { GLYPH_NOTE } else { " " };
    vec![Span::styled(glyph, style), Span::styled(note, Style::new().fg(accent))]
}

/// Date and annotation of the day under the cursor.
fn day_details(store: &AppStore) -> Line<'static> {
    let year = store.core.year();
    let date = format_display_date(year, store.cursor).unwrap_or_default();
    let mut spans = vec![Span::raw(date).bold()];

    if let Some(cell) = store.core.grid().cell(store.cursor)
        && let Some(annotation) = store.core.store().annotation(&cell.key)
    {
        if let Some(emoji) = &annotation.emoji {
            spans.push(Span::raw(format!("  {emoji}")));
        }
        if let Some(color) = annotation.color.as_deref().and_then(parse_hex_color) {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(GLYPH_DAY, Style::new().fg(color)));
        }
        if let Some(note) = &annotation.note {
            spans.push(Span::raw(format!("  {note}")).italic());
        }
    }
    Line::from(spans)
}

/// The latest status message, red for errors.
pub fn status_line(store: &AppStore) -> Option<Line<'static>> {
    store.status.as_ref().map(|s| match s.error {
        true => Line::from(s.text.clone().red()),
        false => Line::from(s.text.clone().green()),
    })
}

fn accent_color(store: &AppStore) -> Color {
    parse_hex_color(store.core.store().theme().accent()).unwrap_or(Color::Magenta)
}

fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Move ".into(),
        "<←↓↑→>".blue().bold(),
        " Edit ".into(),
        "<Enter>".blue().bold(),
        " Today ".into(),
        "<t>".blue().bold(),
        " Year ".into(),
        "<[ ]>".blue().bold(),
        " Settings ".into(),
        "<s>".blue().bold(),
        " Quit ".into(),
        "<q> ".blue().bold(),
    ])
}
