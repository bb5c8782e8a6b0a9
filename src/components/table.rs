//! Dashboard table component
//!
//! Renders a `TableModel` with a search input above it, sortable headers,
//! and a scrollable body. Column widths are computed from display width so
//! Arabic text lines up. Presentation state (scroll, search input) lives
//! here; row data and visibility live in the model.

use crate::action::Action;
use crate::format::{format_currency, format_date, parse_date};
use crate::model::table::{CellDisplay, Column, TableModel};
use crate::model::theme::Palette;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Widest a column may grow before cells are truncated
const MAX_COLUMN_WIDTH: usize = 30;

const SEARCH_PLACEHOLDER: &str = "البحث...";

#[derive(Default)]
pub struct DashboardTable {
    pub scroll: usize,
    pub search_mode: bool,
    pub search_buffer: String,
}

impl DashboardTable {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.search_mode {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(c) => Some(Action::SearchInput(c)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') => Some(Action::FirstRow),
            KeyCode::Char('G') => Some(Action::LastRow),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('s') => Some(Action::SortColumn),
            KeyCode::Char('c') => Some(Action::CopyRow),
            KeyCode::Char('n') => Some(Action::OpenNewRecordForm),
            KeyCode::Char('e') => Some(Action::OpenEditRecordForm),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::OpenConfirmDelete),
            _ => None,
        }
    }

    /// Track search input state; the filter itself is applied by the app
    /// after the debounce window
    pub fn update(&mut self, action: &Action) {
        match action {
            Action::EnterSearchMode => self.search_mode = true,
            Action::ExitSearchMode => self.search_mode = false,
            Action::SearchInput(c) => self.search_buffer.push(*c),
            Action::SearchBackspace => {
                self.search_buffer.pop();
            }
            _ => {}
        }
    }

    /// Scroll so the given visible-row index sits `offset` rows below the
    /// top of the viewport
    pub fn scroll_to(&mut self, index: usize, offset: usize) {
        self.scroll = index.saturating_sub(offset);
    }

    pub fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        model: &TableModel,
        palette: &Palette,
        loading: bool,
    ) {
        // search input line
        let search_line = if self.search_buffer.is_empty() && !self.search_mode {
            Line::from(Span::styled(
                format!(" ⌕ {SEARCH_PLACEHOLDER}"),
                Style::default().fg(palette.dim),
            ))
        } else {
            let cursor = if self.search_mode { "▏" } else { "" };
            Line::from(vec![
                Span::styled(" ⌕ ", Style::default().fg(palette.accent)),
                Span::styled(
                    format!("{}{}", self.search_buffer, cursor),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let widths = column_widths(model);
        let mut lines = vec![search_line, header_line(model, &widths, palette)];
        lines.push(separator_line(&widths, palette));

        let chrome_lines = lines.len() + 1; // plus footer
        let viewport = (area.height as usize).saturating_sub(chrome_lines);
        self.clamp_scroll(model, viewport);

        for (visible_index, row) in model
            .visible_rows()
            .enumerate()
            .skip(self.scroll)
            .take(viewport)
        {
            let selected = visible_index == model.selected;
            let style = if selected {
                Style::default()
                    .fg(palette.selection_fg)
                    .bg(palette.selection_bg)
            } else {
                Style::default().fg(palette.text)
            };

            let spans: Vec<Span> = row
                .cells
                .iter()
                .enumerate()
                .flat_map(|(i, cell)| {
                    let width = widths.get(i).copied().unwrap_or(10);
                    let column = model.columns.get(i);
                    let text = column
                        .map(|c| format_cell(c, cell))
                        .unwrap_or_else(|| cell.clone());
                    vec![
                        Span::styled(pad_to_width(&text, width), style),
                        Span::styled(" │ ", Style::default().fg(palette.border)),
                    ]
                })
                .collect();
            lines.push(Line::from(spans));
        }

        // footer: totals plus the panel's loading mark
        let mut footer = vec![Span::styled(
            format!(" إجمالي الصفوف: {}", model.rows.len()),
            Style::default().fg(palette.warning),
        )];
        if model.visible_count() != model.rows.len() {
            footer.push(Span::styled(
                format!("  المعروض: {}", model.visible_count()),
                Style::default().fg(palette.dim),
            ));
        }
        if loading {
            footer.push(Span::styled(
                "  جاري التحميل...",
                Style::default().fg(palette.dim).add_modifier(Modifier::ITALIC),
            ));
        }
        lines.push(Line::from(footer));

        frame.render_widget(Paragraph::new(lines), area);

        let total = model.visible_count();
        if total > viewport {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(viewport)).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area,
                &mut scrollbar_state,
            );
        }
    }

    /// Keep the selected row inside the viewport
    fn clamp_scroll(&mut self, model: &TableModel, viewport: usize) {
        if viewport == 0 {
            return;
        }
        if model.selected < self.scroll {
            self.scroll = model.selected;
        } else if model.selected >= self.scroll + viewport {
            self.scroll = model.selected + 1 - viewport;
        }
        let max_scroll = model.visible_count().saturating_sub(viewport);
        self.scroll = self.scroll.min(max_scroll);
    }
}

fn header_line(model: &TableModel, widths: &[usize], palette: &Palette) -> Line<'static> {
    let spans: Vec<Span> = model
        .columns
        .iter()
        .enumerate()
        .flat_map(|(i, column)| {
            let marker = if model.sorted_by == Some(i) {
                " ▲"
            } else if column.sort.is_some() {
                " ↕"
            } else {
                ""
            };
            let title = format!("{}{}", column.title, marker);
            let mut style = Style::default()
                .fg(palette.header)
                .add_modifier(Modifier::BOLD);
            if i == model.selected_col {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            vec![
                Span::styled(pad_to_width(&title, widths[i]), style),
                Span::raw(" │ "),
            ]
        })
        .collect();
    Line::from(spans)
}

fn separator_line(widths: &[usize], palette: &Palette) -> Line<'static> {
    let separator: String = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    Line::from(Span::styled(separator, Style::default().fg(palette.border)))
}

/// Column widths from header titles and the formatted cells of visible
/// rows, capped so one long value cannot swallow the screen
fn column_widths(model: &TableModel) -> Vec<usize> {
    let mut widths: Vec<usize> = model
        .columns
        .iter()
        .map(|c| c.title.width() + 2) // room for the sort marker
        .collect();

    for row in model.visible_rows() {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                let text = model
                    .columns
                    .get(i)
                    .map(|c| format_cell(c, cell))
                    .unwrap_or_else(|| cell.clone());
                *width = (*width).max(text.width());
            }
        }
    }

    for width in &mut widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }
    widths
}

/// Render a raw cell value per its column's display mode, falling back to
/// the raw text when it does not parse
pub fn format_cell(column: &Column, raw: &str) -> String {
    match column.display {
        CellDisplay::Plain => raw.to_string(),
        CellDisplay::Currency => match raw.trim().parse::<f64>() {
            Ok(amount) => format_currency(amount),
            Err(_) => raw.to_string(),
        },
        CellDisplay::Date => match parse_date(raw) {
            Some(date) => format_date(date),
            None => raw.to_string(),
        },
    }
}

/// Pad or truncate to an exact display width
fn pad_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    if current <= width {
        let mut padded = s.to_string();
        padded.push_str(&" ".repeat(width - current));
        return padded;
    }

    let mut truncated = String::new();
    let mut used = 0;
    for c in s.chars() {
        let char_width = UnicodeWidthStr::width(c.to_string().as_str());
        if used + char_width > width.saturating_sub(1) {
            break;
        }
        truncated.push(c);
        used += char_width;
    }
    truncated.push('…');
    truncated.push_str(&" ".repeat(width.saturating_sub(used + 1)));
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::SortKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_slash_enters_search_mode() {
        let mut table = DashboardTable::default();
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('/'))),
            Some(Action::EnterSearchMode)
        );
    }

    #[test]
    fn test_chars_route_to_search_while_in_search_mode() {
        let mut table = DashboardTable::default();
        table.search_mode = true;
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('s'))),
            Some(Action::SearchInput('s'))
        );
        assert_eq!(
            table.handle_key_event(key(KeyCode::Esc)),
            Some(Action::ExitSearchMode)
        );
    }

    #[test]
    fn test_update_tracks_search_buffer() {
        let mut table = DashboardTable::default();
        table.update(&Action::EnterSearchMode);
        assert!(table.search_mode);
        table.update(&Action::SearchInput('ن'));
        table.update(&Action::SearchInput('ي'));
        assert_eq!(table.search_buffer, "ني");
        table.update(&Action::SearchBackspace);
        assert_eq!(table.search_buffer, "ن");
        table.update(&Action::ExitSearchMode);
        assert!(!table.search_mode);
    }

    #[test]
    fn test_scroll_to_with_offset() {
        let mut table = DashboardTable::default();
        table.scroll_to(10, 3);
        assert_eq!(table.scroll, 7);
        table.scroll_to(2, 5);
        assert_eq!(table.scroll, 0);
    }

    #[test]
    fn test_format_cell_currency_and_fallback() {
        let column = Column::new("السعر")
            .sortable(SortKind::Number)
            .display(CellDisplay::Currency);
        assert_eq!(format_cell(&column, "15000"), "١٥٬٠٠٠ ج.س");
        assert_eq!(format_cell(&column, "غير متوفر"), "غير متوفر");
    }

    #[test]
    fn test_format_cell_date_and_fallback() {
        let column = Column::new("التاريخ")
            .sortable(SortKind::Date)
            .display(CellDisplay::Date);
        assert_eq!(format_cell(&column, "2026-08-08"), "٠٨/٠٨/٢٠٢٦");
        assert_eq!(format_cell(&column, "لاحقا"), "لاحقا");
    }

    #[test]
    fn test_pad_to_width_pads_and_truncates() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        let truncated = pad_to_width("abcdefgh", 4);
        assert_eq!(truncated.width(), 4);
        assert!(truncated.contains('…'));
    }
}
