//! Analytics: KPI cards and tabbed charts over the history window

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph, Tabs, Widget},
};

use crate::analytics::{
    asset_performance, kpis, system_alerts, AlertSeverity, AnalyticsTab, Kpi,
};
use crate::core::state::AppState;
use crate::sim::{HistoryBuffer, HistoryMetric};
use crate::ui::theme::Theme;
use crate::ui::widgets::panel;

pub struct AnalyticsPanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

/// Padded `[min, max]` over every point, `[0, 1]` when there are none
fn value_bounds(series: &[Vec<(f64, f64)>]) -> [f64; 2] {
    let (lo, hi) = series
        .iter()
        .flatten()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    if lo > hi {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo) * 0.1).max(1.0);
    [(lo - pad).max(0.0), hi + pad]
}

fn time_labels(history: &HistoryBuffer) -> Vec<Line<'static>> {
    let format = |s: Option<&crate::sim::HistoricalSample>| {
        s.map(|s| s.timestamp.format("%H:%M").to_string())
            .unwrap_or_default()
    };
    vec![
        Line::from(format(history.iter().next())),
        Line::from(format(history.latest())),
    ]
}

impl<'a> AnalyticsPanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn render_kpi(&self, kpi: &Kpi, area: Rect, buf: &mut Buffer) {
        let trend_color = if kpi.rising() {
            self.theme.colors.success
        } else {
            self.theme.colors.error
        };
        Paragraph::new(vec![
            Line::from(Span::styled(kpi.value_text(), self.theme.styles.value)),
            Line::from(Span::styled(
                kpi.trend_text(),
                Style::default().fg(trend_color),
            )),
        ])
        .block(panel(kpi.label, self.theme, false))
        .render(area, buf);
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let range_label = format!("range {} [g] ", self.state.history_range().label());
        let width = range_label.chars().count() as u16;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(width)])
            .split(area);

        Tabs::new(AnalyticsTab::ALL.iter().map(|t| Line::from(t.label())))
            .select(self.state.panels.analytics.tab.index())
            .style(self.theme.styles.tab_inactive)
            .highlight_style(self.theme.styles.tab_active)
            .render(columns[0], buf);

        Paragraph::new(Span::styled(range_label, self.theme.styles.keybind))
            .render(columns[1], buf);
    }

    fn render_series(&self, title: &str, metrics: &[HistoryMetric], area: Rect, buf: &mut Buffer) {
        let history = &self.state.history;
        let series: Vec<Vec<(f64, f64)>> = metrics.iter().map(|&m| history.series(m)).collect();
        let bounds = value_bounds(&series);
        let x_max = (history.window_size().saturating_sub(1) as f64).max(1.0);

        let datasets: Vec<Dataset> = metrics
            .iter()
            .zip(series.iter())
            .map(|(&metric, data)| {
                Dataset::default()
                    .name(metric.label())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.series(metric)))
                    .data(data)
            })
            .collect();

        Chart::new(datasets)
            .block(panel(title, self.theme, true))
            .x_axis(
                Axis::default()
                    .style(self.theme.styles.label)
                    .bounds([0.0, x_max])
                    .labels(time_labels(history)),
            )
            .y_axis(
                Axis::default()
                    .style(self.theme.styles.label)
                    .bounds(bounds)
                    .labels(vec![
                        Line::from(format!("{:.0}", bounds[0])),
                        Line::from(format!("{:.0}", bounds[1])),
                    ]),
            )
            .render(area, buf);
    }

    fn render_assets(&self, area: Rect, buf: &mut Buffer) {
        let rows = asset_performance();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let bars: Vec<Bar> = rows
            .iter()
            .map(|row| {
                Bar::default()
                    .value(row.efficiency)
                    .text_value(format!("{}%", row.efficiency))
                    .label(Line::from(row.name.split_whitespace().next().unwrap_or(row.name)))
                    .style(Style::default().fg(self.theme.colors.accent_primary))
            })
            .collect();

        BarChart::default()
            .block(panel("Asset Efficiency", self.theme, true))
            .data(BarGroup::default().bars(&bars))
            .bar_width(9)
            .bar_gap(2)
            .max(100)
            .value_style(
                Style::default()
                    .fg(self.theme.colors.bg_primary)
                    .bg(self.theme.colors.accent_primary),
            )
            .render(columns[0], buf);

        let mut lines = vec![Line::from(Span::styled(
            format!("{:<26}{:>8}{:>8}", "Asset", "Uptime", "Errors"),
            self.theme.styles.label,
        ))];
        lines.extend(rows.iter().map(|row| {
            let errors = if row.errors > 5 {
                self.theme.colors.error
            } else {
                self.theme.colors.fg_primary
            };
            Line::from(vec![
                Span::styled(format!("{:<26}", row.name), self.theme.styles.list_item),
                Span::styled(format!("{:>7.1}%", row.uptime), self.theme.styles.value),
                Span::styled(format!("{:>8}", row.errors), Style::default().fg(errors)),
            ])
        }));

        Paragraph::new(lines)
            .block(panel("Reliability", self.theme, false))
            .render(columns[1], buf);
    }

    fn render_alerts(&self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = system_alerts()
            .into_iter()
            .flat_map(|alert| {
                let color = match alert.severity {
                    AlertSeverity::Error => self.theme.colors.error,
                    AlertSeverity::Warning => self.theme.colors.warning,
                    AlertSeverity::Success => self.theme.colors.success,
                    AlertSeverity::Info => self.theme.colors.info,
                };
                [
                    Line::from(vec![
                        Span::styled(
                            format!(" {} ", alert.severity.icon()),
                            Style::default().fg(color),
                        ),
                        Span::styled(alert.message, self.theme.styles.list_item),
                    ]),
                    Line::from(Span::styled(
                        format!("   {}", alert.time),
                        self.theme.styles.label,
                    )),
                ]
            })
            .collect();

        Paragraph::new(lines)
            .block(panel("System Alerts", self.theme, true))
            .render(area, buf);
    }
}

impl<'a> Widget for AnalyticsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(8),
            ])
            .split(area);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[0]);
        for (kpi, card) in kpis(&self.state.history).iter().zip(cards.iter()) {
            self.render_kpi(kpi, *card, buf);
        }

        self.render_tabs(rows[1], buf);

        let body = rows[2];
        match self.state.panels.analytics.tab {
            AnalyticsTab::Performance => self.render_series(
                "System Performance",
                &[
                    HistoryMetric::Cpu,
                    HistoryMetric::Memory,
                    HistoryMetric::Temperature,
                ],
                body,
                buf,
            ),
            AnalyticsTab::Efficiency => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50); 2])
                    .split(body);
                self.render_series("Efficiency", &[HistoryMetric::Efficiency], halves[0], buf);
                self.render_series("Power Consumption", &[HistoryMetric::Power], halves[1], buf);
            }
            AnalyticsTab::Assets => self.render_assets(body, buf),
            AnalyticsTab::Alerts => self.render_alerts(body, buf),
        }
    }
}
