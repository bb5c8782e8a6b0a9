//! Help dialog component
//!
//! Displays all keyboard shortcuts available in the application.

use crate::action::Action;
use crate::component::Component;
use crate::model::theme::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            margin,
            margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content(palette);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" اختصارات لوحة المفاتيح ")
                    .title_style(
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(palette.accent)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let section_style = Style::default()
        .fg(palette.warning)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(palette.dim);

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {} ", title), section_style)));
    };
    let entry = |key: &str, description: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), key_style),
            Span::styled(description.to_string(), dim),
        ])
    };

    add_section(&mut lines, "التنقل");
    lines.push(entry("Tab / [ ]", "التبديل بين التبويبات"));
    lines.push(entry("j / ↓", "الصف التالي"));
    lines.push(entry("k / ↑", "الصف السابق"));
    lines.push(entry("h l / ← →", "اختيار العمود"));
    lines.push(entry("g / G", "أول / آخر صف"));
    lines.push(entry("Ctrl-d/u", "صفحة للأسفل / للأعلى"));

    add_section(&mut lines, "الجدول");
    lines.push(entry("/", "البحث في الجدول"));
    lines.push(entry("s", "ترتيب حسب العمود المحدد"));
    lines.push(entry("c", "نسخ الصف المحدد"));

    add_section(&mut lines, "السجلات");
    lines.push(entry("n", "سجل جديد"));
    lines.push(entry("e", "تعديل السجل المحدد"));
    lines.push(entry("d", "حذف السجل المحدد"));
    lines.push(entry("Ctrl-Enter", "إرسال النموذج المفتوح"));

    add_section(&mut lines, "عام");
    lines.push(entry("r", "تحديث البيانات"));
    lines.push(entry("t", "تبديل السمة (فاتح/داكن)"));
    lines.push(entry("x", "إغلاق آخر تنبيه"));
    lines.push(entry("?", "هذه الشاشة"));
    lines.push(entry("Esc", "إغلاق النافذة الحالية"));
    lines.push(entry("q", "خروج"));

    lines
}
