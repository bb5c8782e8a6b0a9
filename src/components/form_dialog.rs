//! Record form dialog
//!
//! Renders a `FormModel` inside a centered popup: typed fields with their
//! validation errors, and a submit control that shows the loading label
//! while the save request is in flight. Keys are converted to form
//! actions; all state lives in the model.

use crate::action::Action;
use crate::model::form::{FieldKind, FormModel};
use crate::model::theme::Palette;
use crate::components::centered_popup;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Default)]
pub struct FormDialog {
    spinner_frame: usize,
}

impl FormDialog {
    /// Advance the loading spinner
    pub fn on_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, form: &FormModel) -> Option<Action> {
        // while the request is in flight the controls are disabled
        if form.submitting {
            return match key.code {
                KeyCode::Esc => Some(Action::CloseModal),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SubmitForm)
            }
            KeyCode::Enter => {
                if form.focused == form.submit_index() {
                    Some(Action::SubmitForm)
                } else {
                    Some(Action::FormNextField)
                }
            }
            KeyCode::Tab | KeyCode::Down => Some(Action::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FormPrevField),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Char(' ')
                if form
                    .focused_field()
                    .is_some_and(|f| f.kind == FieldKind::Checkbox) =>
            {
                Some(Action::FormToggle)
            }
            KeyCode::Char(c) => Some(Action::FormInput(c)),
            _ => None,
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, form: &FormModel, palette: &Palette) {
        let content = self.build_content(form, palette);
        let height = (content.len() as u16).saturating_add(2);
        let popup_area = centered_popup(area, 60, height);

        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", form.title))
                .title_style(
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(Style::default().fg(palette.accent)),
        );

        frame.render_widget(paragraph, popup_area);
    }

    fn build_content(&self, form: &FormModel, palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];

        for (index, field) in form.fields.iter().enumerate() {
            let focused = index == form.focused;
            let marker = if focused { "▸" } else { " " };
            let label_style = if focused {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };

            let value = match field.kind {
                FieldKind::Checkbox => {
                    format!("[{}]", if field.checked { "x" } else { " " })
                }
                _ => {
                    let mut value = field.value.clone();
                    if focused {
                        value.push('▏');
                    }
                    value
                }
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} "), label_style),
                Span::styled(format!("{:<14}", field.label), label_style),
                Span::styled(value, Style::default().fg(palette.text)),
            ]));

            if let Some(error) = &field.error {
                lines.push(Line::from(Span::styled(
                    format!("      ⚠ {error}"),
                    Style::default().fg(palette.error),
                )));
            }
        }

        lines.push(Line::from(""));

        // submit control, disabled look while loading
        let submit_focused = form.focused == form.submit_index();
        let submit = if form.submitting {
            Span::styled(
                format!(
                    "   {} {}",
                    SPINNER[self.spinner_frame % SPINNER.len()],
                    form.submit_label
                ),
                Style::default().fg(palette.dim),
            )
        } else {
            let style = if submit_focused {
                Style::default()
                    .fg(palette.selection_fg)
                    .bg(palette.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.accent)
            };
            Span::styled(format!("   [ {} ]", form.submit_label), style)
        };
        lines.push(Line::from(submit));

        lines.push(Line::from(Span::styled(
            "   Tab التالي  Enter إرسال  Esc إغلاق",
            Style::default().fg(palette.dim),
        )));

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::form::{Field, FieldKind};

    fn form() -> FormModel {
        FormModel::new(
            "store-form",
            "بيانات المتجر",
            vec![
                Field::new("name", "الاسم", FieldKind::Text).required(),
                Field::new("active", "نشط", FieldKind::Checkbox),
            ],
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_on_field_advances_focus() {
        let mut dialog = FormDialog::default();
        let form = form();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter), &form),
            Some(Action::FormNextField)
        );
    }

    #[test]
    fn test_enter_on_submit_control_submits() {
        let mut dialog = FormDialog::default();
        let mut form = form();
        form.focused = form.submit_index();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter), &form),
            Some(Action::SubmitForm)
        );
    }

    #[test]
    fn test_ctrl_enter_submits_from_any_field() {
        let mut dialog = FormDialog::default();
        let form = form();
        let ctrl_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL);
        assert_eq!(
            dialog.handle_key_event(ctrl_enter, &form),
            Some(Action::SubmitForm)
        );
    }

    #[test]
    fn test_space_toggles_checkbox_field() {
        let mut dialog = FormDialog::default();
        let mut form = form();
        form.focused = 1;
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char(' ')), &form),
            Some(Action::FormToggle)
        );
    }

    #[test]
    fn test_space_types_into_text_field() {
        let mut dialog = FormDialog::default();
        let form = form();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char(' ')), &form),
            Some(Action::FormInput(' '))
        );
    }

    #[test]
    fn test_controls_disabled_while_submitting() {
        let mut dialog = FormDialog::default();
        let mut form = form();
        form.start_submit();
        assert_eq!(dialog.handle_key_event(key(KeyCode::Enter), &form), None);
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('a')), &form),
            None
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc), &form),
            Some(Action::CloseModal)
        );
    }
}
