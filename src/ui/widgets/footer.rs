//! Footer widget with keybindings

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::state::{AppMode, AppState, View};
use crate::ui::theme::Theme;

pub struct Footer<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

fn bindings(mode: &AppMode, view: View) -> Vec<(&'static str, &'static str)> {
    match mode {
        AppMode::Dashboard => {
            let mut keys = vec![("Tab/1-4", "View")];
            keys.extend(match view {
                View::Map => vec![("↑/↓", "Site"), ("+/-", "Zoom"), ("0", "Reset")],
                View::Assets => vec![("↑/↓", "Asset")],
                View::Control => vec![
                    ("↑/↓", "Select"),
                    ("Enter", "Toggle"),
                    ("←/→", "Adjust"),
                    ("r", "Restart"),
                    ("e", "E-Stop"),
                    ("z", "Reset"),
                ],
                View::Analytics => vec![("←/→", "Tab"), ("g", "Range")],
            });
            keys.extend([("?", "Help"), ("q", "Quit")]);
            keys
        }
        AppMode::Help => vec![("Esc", "Close"), ("q", "Close")],
        AppMode::Confirm { .. } => vec![("y", "Confirm"), ("n", "Cancel"), ("Esc", "Cancel")],
    }
}

impl<'a> Widget for Footer<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.styles.footer);

        let mut spans = Vec::new();
        for (i, (key, action)) in bindings(&self.state.mode, self.state.view)
            .iter()
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.styles.keybind));
            }
            spans.push(Span::styled(
                format!("[{}]", key),
                self.theme.styles.keybind_key,
            ));
            spans.push(Span::styled(
                format!(" {}", action),
                self.theme.styles.keybind,
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x + 1, area.y, &line, area.width.saturating_sub(2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::SystemAction;

    #[test]
    fn control_view_lists_system_actions() {
        let keys: Vec<&str> = bindings(&AppMode::Dashboard, View::Control)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert!(keys.contains(&"e"));
        assert!(keys.contains(&"z"));
    }

    #[test]
    fn confirm_mode_only_offers_answers() {
        let mode = AppMode::Confirm {
            message: String::new(),
            action: SystemAction::EmergencyStop,
        };
        assert_eq!(bindings(&mode, View::Map).len(), 3);
    }
}
