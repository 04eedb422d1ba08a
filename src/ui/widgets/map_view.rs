//! Digital map: site markers on a canvas plus the site list

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Paragraph, Widget,
    },
};

use crate::core::state::AppState;
use crate::map::{MapSite, SiteStatus};
use crate::ui::layout::LayoutManager;
use crate::ui::theme::Theme;
use crate::ui::widgets::panel;

pub struct MapView<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> MapView<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn site_color(&self, status: SiteStatus) -> Color {
        match status {
            SiteStatus::Active => self.theme.colors.success,
            SiteStatus::Maintenance => self.theme.colors.warning,
            SiteStatus::Offline => self.theme.colors.error,
        }
    }

    fn render_canvas(&self, area: Rect, buf: &mut Buffer) {
        let map = &self.state.panels.map;
        let viewport = map.viewport;
        let selected = map.selected_site();
        let visible: Vec<&MapSite> = map.sites.iter().filter(|s| viewport.contains(s)).collect();

        let title = format!(
            "Map  {:.4}, {:.4}  zoom {}",
            viewport.center.0, viewport.center.1, viewport.zoom
        );

        Canvas::default()
            .block(panel(title, self.theme, true))
            .marker(Marker::Braille)
            .background_color(self.theme.colors.bg_primary)
            .x_bounds(viewport.x_bounds())
            .y_bounds(viewport.y_bounds())
            .paint(|ctx| {
                for site in &visible {
                    ctx.draw(&Points {
                        coords: &[(site.lng, site.lat)],
                        color: self.site_color(site.status),
                    });
                }
                if let Some(site) = selected.filter(|s| viewport.contains(s)) {
                    ctx.draw(&Circle {
                        x: site.lng,
                        y: site.lat,
                        radius: viewport.half_span() / 12.0,
                        color: self.theme.colors.accent_primary,
                    });
                }
                ctx.layer();
                for site in &visible {
                    ctx.print(
                        site.lng,
                        site.lat,
                        Line::styled(
                            format!(" {} {}", site.kind.icon(), site.name),
                            Style::default().fg(self.theme.colors.fg_secondary),
                        ),
                    );
                }
            })
            .render(area, buf);
    }

    fn render_sites(&self, area: Rect, buf: &mut Buffer) {
        let map = &self.state.panels.map;
        let lines: Vec<Line> = map
            .sites
            .iter()
            .enumerate()
            .map(|(i, site)| {
                let style = if i == map.selected_index {
                    self.theme.styles.list_item_selected
                } else {
                    self.theme.styles.list_item
                };
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(self.site_color(site.status))),
                    Span::styled(site.name, style),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .block(panel("Sites", self.theme, false))
            .render(area, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = panel("Details", self.theme, false);
        let Some(site) = self.state.panels.map.selected_site() else {
            Paragraph::new("No site selected")
                .block(block)
                .render(area, buf);
            return;
        };

        let label = self.theme.styles.label;
        let value = self.theme.styles.value;
        let row = |name: &'static str, text: String| {
            Line::from(vec![
                Span::styled(format!("{:<12}", name), label),
                Span::styled(text, value),
            ])
        };
        let optional = |v: Option<f64>, unit: &str| {
            v.map(|v| format!("{:.0}{}", v, unit))
                .unwrap_or_else(|| "n/a".to_string())
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("{} {}", site.kind.icon(), site.name),
                self.theme.styles.panel_title,
            )),
            Line::default(),
            row("Type", site.kind.label().to_string()),
            Line::from(vec![
                Span::styled(format!("{:<12}", "Status"), label),
                Span::styled(
                    site.status.label(),
                    Style::default().fg(self.site_color(site.status)),
                ),
            ]),
            row("Location", format!("{:.4}, {:.4}", site.lat, site.lng)),
            row("Temperature", optional(site.temperature, "°F")),
            row("Efficiency", optional(site.efficiency, "%")),
            row("Updated", site.last_update.to_string()),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

impl<'a> Widget for MapView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (main, sidebar) = LayoutManager::with_sidebar(area, 32);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.state.panels.map.sites.len() as u16 + 2),
                Constraint::Min(6),
            ])
            .split(sidebar);

        self.render_canvas(main, buf);
        self.render_sites(side[0], buf);
        self.render_details(side[1], buf);
    }
}
