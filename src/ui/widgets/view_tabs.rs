//! View switcher strip below the header

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Tabs, Widget},
};

use crate::core::state::{AppState, View};
use crate::ui::theme::Theme;

pub struct ViewTabs<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> ViewTabs<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl<'a> Widget for ViewTabs<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let titles = View::ALL
            .iter()
            .enumerate()
            .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.label())));

        Tabs::new(titles)
            .select(self.state.view.index())
            .style(self.theme.styles.tab_inactive.bg(self.theme.colors.bg_primary))
            .highlight_style(self.theme.styles.tab_active)
            .divider(ratatui::text::Span::styled(
                "│",
                Style::default().fg(self.theme.colors.border),
            ))
            .render(area, buf);
    }
}
