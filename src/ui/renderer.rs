//! Main UI renderer

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::state::{AppMode, AppState, NotificationLevel, View};
use crate::ui::layout::{centered_rect, LayoutManager};
use crate::ui::widgets::*;

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        let theme = &state.theme;

        // Clear background
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.colors.bg_primary)),
            area,
        );

        let layout = LayoutManager::compute(area);

        frame.render_widget(Header::new(state, theme), layout.header);
        frame.render_widget(ViewTabs::new(state, theme), layout.tabs);
        frame.render_widget(Footer::new(state, theme), layout.footer);

        match state.view {
            View::Map => frame.render_widget(MapView::new(state, theme), layout.body),
            View::Assets => frame.render_widget(AssetMonitor::new(state, theme), layout.body),
            View::Control => frame.render_widget(ControlPanel::new(state, theme), layout.body),
            View::Analytics => frame.render_widget(AnalyticsPanel::new(state, theme), layout.body),
        }

        match &state.mode {
            AppMode::Help => {
                frame.render_widget(HelpOverlay::new(theme), layout.overlay_area);
            }
            AppMode::Confirm { message, .. } => {
                Self::render_confirm_dialog(frame, state, message, layout.overlay_area);
            }
            AppMode::Dashboard => {}
        }

        Self::render_notifications(frame, state);
    }

    fn render_confirm_dialog(frame: &mut Frame, state: &AppState, message: &str, area: Rect) {
        let theme = &state.theme;

        let dialog_area = centered_rect(60, 35, area);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(" Confirm ", theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.colors.warning))
            .style(Style::default().bg(theme.colors.bg_secondary));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);
        if inner.height < 3 {
            return;
        }

        let msg_para = Paragraph::new(message)
            .style(Style::default().fg(theme.colors.fg_primary))
            .alignment(Alignment::Center);

        frame.render_widget(
            msg_para,
            Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            },
        );

        let buttons = Line::from(vec![
            Span::styled("[Y]es", theme.styles.keybind_key),
            Span::styled("  ", theme.styles.keybind),
            Span::styled("[N]o", theme.styles.keybind_key),
        ]);

        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            },
        );
    }

    fn render_notifications(frame: &mut Frame, state: &AppState) {
        let theme = &state.theme;
        let area = frame.area();

        // Stacked in the top-right corner, below the header
        let mut y = area.y + 2;
        for notification in state.notifications.iter().rev().take(3) {
            if y >= area.bottom() {
                break;
            }
            let (style, icon) = match notification.level {
                NotificationLevel::Info => (theme.styles.notification_info, "ℹ"),
                NotificationLevel::Success => (theme.styles.notification_success, "✓"),
                NotificationLevel::Warning => (theme.styles.status_maintenance, "⚠"),
                NotificationLevel::Error => (theme.styles.notification_error, "✗"),
            };

            let msg = format!(" {} {} ", icon, notification.message);
            let width = (msg.chars().count() as u16).min(48).min(area.width);
            let x = area.right().saturating_sub(width + 2);

            frame.render_widget(
                Paragraph::new(Span::styled(msg, style))
                    .style(Style::default().bg(theme.colors.bg_tertiary)),
                Rect {
                    x,
                    y,
                    width,
                    height: 1,
                },
            );

            y += 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::state::NotificationLevel;
    use crate::ui::theme::Theme;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| Renderer::render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state(view: View) -> AppState {
        let settings = Config::default().validate().unwrap();
        let mut state = AppState::new(&settings, Theme::default(), Utc::now());
        state.view = view;
        state
    }

    #[test]
    fn every_view_renders() {
        for view in View::ALL {
            let screen = draw(&state(view));
            assert!(screen.contains("TWINVIEW"), "{:?}", view);
        }
    }

    #[test]
    fn asset_monitor_shows_fleet() {
        let screen = draw(&state(View::Assets));
        assert!(screen.contains("Manufacturing Line Alpha"));
        assert!(screen.contains("MAINTENANCE"));
    }

    #[test]
    fn control_center_shows_controls() {
        let screen = draw(&state(View::Control));
        assert!(screen.contains("GPU Acceleration"));
        assert!(screen.contains("Emergency Stop"));
    }

    #[test]
    fn confirm_dialog_and_notification_overlay() {
        let mut s = state(View::Control);
        s.mode = AppMode::Confirm {
            message: "Reset System? (y/n)".to_string(),
            action: crate::control::SystemAction::ResetSystem,
        };
        s.add_notification("Saved".to_string(), NotificationLevel::Success, Utc::now());
        let screen = draw(&s);
        assert!(screen.contains("Reset System? (y/n)"));
        assert!(screen.contains("Saved"));
    }
}
