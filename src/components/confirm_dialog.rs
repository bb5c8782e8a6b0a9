//! Confirmation dialog for destructive actions
//!
//! A blocking yes/no gate: the intercepted action only proceeds on an
//! explicit confirmation; cancelling aborts it with no side effects.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::theme::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const MSG_CONFIRM: &str = "هل أنت متأكد من هذا الإجراء؟ لا يمكن التراجع عنه.";

/// Destructive action confirmation dialog
#[derive(Default)]
pub struct ConfirmDialog;

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let popup_area = centered_popup(area, 56, 7);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                MSG_CONFIRM,
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(palette.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("نعم، تابع  "),
                Span::styled(
                    " n/Esc ",
                    Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("لا، إلغاء"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.warning))
                    .title(" تأكيد ")
                    .title_style(
                        Style::default()
                            .fg(palette.warning)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_keys() {
        let mut dialog = ConfirmDialog;
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('y'))).unwrap(),
            Some(Action::ConfirmModal)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::ConfirmModal)
        );
    }

    #[test]
    fn test_cancel_keys() {
        let mut dialog = ConfirmDialog;
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('n'))).unwrap(),
            Some(Action::CloseModal)
        );
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut dialog = ConfirmDialog;
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('z'))).unwrap(), None);
    }
}
