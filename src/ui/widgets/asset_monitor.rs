//! Asset monitor: fleet overview cards and one card per asset

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

use crate::core::state::AppState;
use crate::sim::{Channel, MonitoredEntity};
use crate::ui::theme::Theme;
use crate::ui::widgets::panel;

const CARD_HEIGHT: u16 = 8;
const CARD_COLUMNS: usize = 2;

pub struct AssetMonitor<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> AssetMonitor<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn render_overview(&self, area: Rect, buf: &mut Buffer) {
        let agg = self.state.fleet.aggregate();
        let cards = [
            (
                "Total Assets",
                agg.total.to_string(),
                format!("{} in maintenance", agg.maintenance_count),
            ),
            (
                "Online",
                format!("{}/{}", agg.online_count, agg.total),
                format!("{} offline", agg.offline_count),
            ),
            (
                "Avg CPU",
                format!("{:.1}%", agg.avg_cpu),
                format!("memory {:.1}%", agg.avg_memory),
            ),
            (
                "Avg Temp",
                format!("{:.1}°F", agg.avg_temperature),
                format!("network {:.1}%", agg.avg_network),
            ),
            (
                "Total Power",
                format!("{:.0}W", agg.total_power),
                "all assets".to_string(),
            ),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, cards.len() as u32); 5])
            .split(area);

        for ((title, value, detail), column) in cards.into_iter().zip(columns.iter()) {
            Paragraph::new(vec![
                Line::from(Span::styled(value, self.theme.styles.value)),
                Line::from(Span::styled(detail, self.theme.styles.label)),
            ])
            .block(panel(title, self.theme, false))
            .render(*column, buf);
        }
    }

    fn render_card(
        &self,
        entity: &MonitoredEntity,
        selected: bool,
        now: DateTime<Utc>,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let block = panel(entity.name.as_str(), self.theme, selected);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 6])
            .split(inner);

        Paragraph::new(Line::from(vec![
            Span::styled(&entity.kind, self.theme.styles.list_item),
            Span::styled(format!(" · {}", entity.location), self.theme.styles.label),
        ]))
        .render(rows[0], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("● {}", entity.status.label()),
                self.theme.asset_status(entity.status),
            ),
            Span::styled(
                format!("  updated {}", entity.age_label(now)),
                self.theme.styles.label,
            ),
        ]))
        .render(rows[1], buf);

        let table = self.state.fleet.table();
        let gauges = [
            (Channel::Cpu, "CPU"),
            (Channel::Memory, "MEM"),
            (Channel::Temperature, "TEMP"),
        ];
        for (row, (channel, short)) in rows[2..5].iter().zip(gauges) {
            let value = entity.metrics.get(channel);
            let color = if entity.status.is_online() {
                self.theme.severity(channel.severity(value))
            } else {
                self.theme.colors.fg_muted
            };
            Gauge::default()
                .gauge_style(Style::default().fg(color).bg(self.theme.colors.bg_tertiary))
                .ratio(table.get(channel).ratio(value))
                .label(Span::styled(
                    format!("{} {:.1}{}", short, value, channel.unit()),
                    Style::default().fg(self.theme.colors.fg_primary),
                ))
                .render(*row, buf);
        }

        Paragraph::new(Line::from(vec![
            Span::styled("Power ", self.theme.styles.label),
            Span::styled(
                format!("{:.0}W", entity.metrics.power),
                self.theme.styles.value,
            ),
            Span::styled("   Network ", self.theme.styles.label),
            Span::styled(
                format!("{:.0}%", entity.metrics.network),
                self.theme.styles.value,
            ),
        ]))
        .render(rows[5], buf);
    }
}

impl<'a> Widget for AssetMonitor<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(CARD_HEIGHT)])
            .split(area);

        self.render_overview(chunks[0], buf);

        // One snapshot for the whole frame
        let entities = self.state.fleet.snapshot();
        let selected = self.state.panels.monitor.selected_index;
        let now = Utc::now();
        let row_count = entities.len().div_ceil(CARD_COLUMNS);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                (0..row_count)
                    .map(|_| Constraint::Length(CARD_HEIGHT))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(chunks[1]);

        for (row_index, group) in entities.chunks(CARD_COLUMNS).enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, CARD_COLUMNS as u32); CARD_COLUMNS])
                .split(rows[row_index]);

            for (col_index, entity) in group.iter().enumerate() {
                let index = row_index * CARD_COLUMNS + col_index;
                self.render_card(entity, index == selected, now, columns[col_index], buf);
            }
        }
    }
}
