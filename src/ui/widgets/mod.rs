//! UI Widgets

pub mod analytics_panel;
pub mod asset_monitor;
pub mod control_panel;
pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod map_view;
pub mod view_tabs;

pub use analytics_panel::AnalyticsPanel;
pub use asset_monitor::AssetMonitor;
pub use control_panel::ControlPanel;
pub use footer::Footer;
pub use header::Header;
pub use help_overlay::HelpOverlay;
pub use map_view::MapView;
pub use view_tabs::ViewTabs;

use ratatui::{
    style::Style,
    text::Span,
    widgets::{Block, Borders},
};

use crate::ui::theme::Theme;

/// Bordered panel with the theme's title and border styles
pub(crate) fn panel<'a>(title: impl Into<String>, theme: &Theme, focused: bool) -> Block<'a> {
    let border = if focused {
        theme.styles.panel_border_focused
    } else {
        theme.styles.panel_border
    };
    Block::default()
        .title(Span::styled(
            format!(" {} ", title.into()),
            theme.styles.panel_title,
        ))
        .borders(Borders::ALL)
        .border_style(border)
        .style(Style::default().bg(theme.colors.bg_primary))
}
