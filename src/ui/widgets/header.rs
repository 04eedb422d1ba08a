//! Header widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::AppState;
use crate::ui::theme::Theme;

pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn flag(&self, label: &'a str, on: bool) -> Span<'a> {
        let (dot, color) = if on {
            ("●", self.theme.colors.success)
        } else {
            ("○", self.theme.colors.error)
        };
        Span::styled(format!("{} {}", dot, label), Style::default().fg(color))
    }
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.styles.header);

        let muted = Style::default().fg(self.theme.colors.fg_muted);
        let agg = self.state.fleet.aggregate();
        let status = self.state.panels.control.center.status();

        let spans = vec![
            Span::styled(
                " ◈ TWINVIEW ",
                Style::default()
                    .fg(self.theme.colors.accent_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", muted),
            Span::styled(
                self.state.view.label(),
                Style::default().fg(self.theme.colors.fg_primary),
            ),
            Span::styled(" │ ", muted),
            Span::styled(
                format!("{}/{} online", agg.online_count, agg.total),
                Style::default().fg(self.theme.colors.info),
            ),
            Span::styled(" │ ", muted),
            self.flag("SIM", status.simulation_running),
            Span::raw(" "),
            self.flag("STREAM", status.data_streaming),
            Span::raw(" "),
            self.flag("SEC", status.security_active),
        ];

        let left_line = Line::from(spans);
        buf.set_line(area.x, area.y, &left_line, area.width);

        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        let time_span = Span::styled(&time, muted);
        let time_x = area.x + area.width.saturating_sub(time.len() as u16 + 1);
        buf.set_span(time_x, area.y, &time_span, time.len() as u16);
    }
}
