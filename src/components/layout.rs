//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    /// Banner region above the dashboard; absent when no alert is live
    pub alerts: Option<Rect>,
    pub tabs: Rect,
    pub stats: Rect,
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the main screen layout
///
/// `alert_lines` is the number of banner rows to reserve at the top,
/// capped at three so a burst of alerts cannot push the table away.
pub fn calculate_main_layout(area: Rect, alert_lines: u16) -> MainLayout {
    let alert_lines = alert_lines.min(3);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(alert_lines),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        alerts: if alert_lines > 0 { Some(chunks[0]) } else { None },
        tabs: chunks[1],
        stats: chunks[2],
        table: chunks[3],
        status: chunks[4],
        help: chunks[5],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 10);
    }

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered_popup(area, 40, 10);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }

    #[test]
    fn test_alert_region_capped_at_three_lines() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_main_layout(area, 7);
        assert_eq!(layout.alerts.unwrap().height, 3);
    }

    #[test]
    fn test_no_alert_region_without_alerts() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_main_layout(area, 0);
        assert!(layout.alerts.is_none());
    }
}
