//! Alert banner rendering
//!
//! Banners stack above the dashboard, newest on top, colored by kind.

use crate::model::alert::{AlertKind, AlertStack};
use crate::model::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_alerts(frame: &mut Frame, area: Rect, alerts: &AlertStack, palette: &Palette) {
    let mut lines = Vec::new();
    for alert in alerts.iter().take(area.height as usize) {
        let color = match alert.kind {
            AlertKind::Success => palette.success,
            AlertKind::Error => palette.error,
            AlertKind::Warning => palette.warning,
            AlertKind::Info => palette.info,
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", alert.kind.icon()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(alert.message.clone(), Style::default().fg(color)),
            Span::styled("  x إغلاق", Style::default().fg(palette.dim)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
