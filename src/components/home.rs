//! Dashboard home screen
//!
//! Owns the per-tab table presentation state and composes the main layout:
//! alert banners, tab strip, stats line, the active table, a status bar
//! and the shortcut hints.

use crate::action::Action;
use crate::components::alert_banners::draw_alerts;
use crate::components::layout::calculate_main_layout;
use crate::components::table::DashboardTable;
use crate::format::format_time;
use crate::model::alert::AlertStack;
use crate::model::domain::{Dataset, DomainState};
use crate::model::theme::{Palette, Theme};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct HomeComponent {
    stores: DashboardTable,
    products: DashboardTable,
    orders: DashboardTable,
}

impl HomeComponent {
    pub fn table(&self, dataset: Dataset) -> &DashboardTable {
        match dataset {
            Dataset::Stores => &self.stores,
            Dataset::Products => &self.products,
            Dataset::Orders => &self.orders,
        }
    }

    pub fn table_mut(&mut self, dataset: Dataset) -> &mut DashboardTable {
        match dataset {
            Dataset::Stores => &mut self.stores,
            Dataset::Products => &mut self.products,
            Dataset::Orders => &mut self.orders,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, dataset: Dataset) -> Option<Action> {
        self.table_mut(dataset).handle_key_event(key)
    }

    pub fn update(&mut self, dataset: Dataset, action: &Action) {
        self.table_mut(dataset).update(action);
    }
}

/// Everything the home screen needs to render one frame
pub struct HomeRenderContext<'a> {
    pub dataset: Dataset,
    pub domain: &'a DomainState,
    pub theme: Theme,
    pub alerts: &'a AlertStack,
    /// Whether a fetch for the active dataset is in flight
    pub loading: bool,
    /// Last observed backend state; `None` before the first probe
    pub online: Option<bool>,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
    palette: &Palette,
) {
    let layout = calculate_main_layout(area, ctx.alerts.len() as u16);

    if let Some(alert_area) = layout.alerts {
        draw_alerts(frame, alert_area, ctx.alerts, palette);
    }

    draw_tabs(frame, layout.tabs, ctx, palette);
    draw_stats(frame, layout.stats, ctx, palette);

    let model = ctx.domain.table(ctx.dataset);
    home.table_mut(ctx.dataset)
        .draw(frame, layout.table, model, palette, ctx.loading);

    draw_status_bar(frame, layout.status, ctx, palette);
    draw_help_bar(frame, layout.help, palette);
}

fn draw_tabs(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext, palette: &Palette) {
    let mut spans = vec![Span::raw(" ")];
    for dataset in Dataset::all() {
        let style = if dataset == ctx.dataset {
            Style::default()
                .fg(palette.selection_fg)
                .bg(palette.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        };
        spans.push(Span::styled(format!(" {} ", dataset.title()), style));
        spans.push(Span::raw(" "));
    }

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" لوحة السوق ")
            .title_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(tabs, area);
}

fn draw_stats(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext, palette: &Palette) {
    let mut spans = Vec::new();
    for dataset in Dataset::all() {
        spans.push(Span::styled(
            format!(" {}: ", dataset.title()),
            Style::default().fg(palette.dim),
        ));
        spans.push(Span::styled(
            ctx.domain.table(dataset).rows.len().to_string(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(last_refresh) = ctx.domain.last_refresh {
        spans.push(Span::styled(
            format!("  آخر تحديث: {}", format_time(last_refresh.time())),
            Style::default().fg(palette.dim),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext, palette: &Palette) {
    let (connectivity, connectivity_color) = match ctx.online {
        Some(true) => ("متصل", palette.success),
        Some(false) => ("غير متصل", palette.error),
        None => ("—", palette.dim),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" السمة: {} ", ctx.theme.label()),
            Style::default().fg(palette.dim),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" الخادم: {connectivity} "),
            Style::default().fg(connectivity_color),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {} ", ctx.dataset.title()),
            Style::default().fg(palette.accent),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help_bar(frame: &mut Frame, area: Rect, palette: &Palette) {
    let line = Line::from(Span::styled(
        " ?: مساعدة  /: بحث  s: ترتيب  n: جديد  e: تعديل  d: حذف  r: تحديث  t: السمة  q: خروج",
        Style::default().fg(palette.dim),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
