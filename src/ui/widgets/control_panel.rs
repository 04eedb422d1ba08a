//! Control center: status flags, system actions and operator controls

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::control::{ControlCategory, ControlKind, SystemAction, SystemControl, SLIDER_MAX};
use crate::core::state::AppState;
use crate::ui::theme::Theme;
use crate::ui::widgets::panel;

const SLIDER_WIDTH: usize = 20;

pub struct ControlPanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

/// `███████░░░ 70` style bar for a slider value
fn slider_bar(value: u8, width: usize) -> String {
    let filled = (value.min(SLIDER_MAX) as usize * width) / SLIDER_MAX as usize;
    format!(
        "{}{} {:>3}",
        "█".repeat(filled),
        "░".repeat(width - filled),
        value
    )
}

impl<'a> ControlPanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let status = self.state.panels.control.center.status();
        let flags = [
            ("Omniverse", status.omniverse_connected, "Connected", "Disconnected"),
            ("Simulation", status.simulation_running, "Running", "Stopped"),
            ("Data Stream", status.data_streaming, "Streaming", "Paused"),
            ("Security", status.security_active, "Active", "Inactive"),
        ];

        let lines: Vec<Line> = flags
            .iter()
            .map(|&(name, on, yes, no)| {
                let (text, style) = if on {
                    (yes, self.theme.styles.status_online)
                } else {
                    (no, self.theme.styles.status_offline)
                };
                Line::from(vec![
                    Span::styled(format!("{:<13}", name), self.theme.styles.label),
                    Span::styled(format!("● {}", text), style),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .block(panel("System Status", self.theme, false))
            .render(area, buf);
    }

    fn render_actions(&self, area: Rect, buf: &mut Buffer) {
        let actions = [
            ("r", SystemAction::RestartSimulation, self.theme.colors.info),
            ("e", SystemAction::EmergencyStop, self.theme.colors.error),
            ("z", SystemAction::ResetSystem, self.theme.colors.warning),
        ];

        let mut lines: Vec<Line> = actions
            .iter()
            .map(|&(key, action, color)| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", key), self.theme.styles.keybind_key),
                    Span::styled(action.label(), Style::default().fg(color)),
                    Span::styled(
                        if action.needs_confirmation() {
                            "  (confirm)"
                        } else {
                            ""
                        },
                        self.theme.styles.label,
                    ),
                ])
            })
            .collect();

        if !self.state.panels.control.center.status().simulation_running {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Simulation paused",
                self.theme.styles.status_maintenance,
            )));
        }

        Paragraph::new(lines)
            .block(panel("System Actions", self.theme, false))
            .render(area, buf);
    }

    fn control_line(&self, control: &SystemControl, selected: bool) -> Vec<Line<'static>> {
        let name_style = if selected {
            self.theme.styles.list_item_selected
        } else {
            self.theme.styles.list_item
        };
        let marker = if selected { "▸ " } else { "  " };

        let setting = match (control.kind, control.value) {
            (ControlKind::Slider, Some(value)) => Span::styled(
                slider_bar(value, SLIDER_WIDTH),
                Style::default().fg(self.theme.colors.accent_primary),
            ),
            _ if control.enabled => Span::styled(
                "[ ON ]",
                self.theme.styles.status_online.add_modifier(Modifier::BOLD),
            ),
            _ => Span::styled("[ OFF ]", self.theme.styles.status_offline),
        };

        vec![
            Line::from(vec![
                Span::styled(marker, self.theme.styles.keybind_key),
                Span::styled(format!("{:<24}", control.name), name_style),
                setting,
            ]),
            Line::from(Span::styled(
                format!("    {}", control.description),
                self.theme.styles.label,
            )),
        ]
    }

    fn render_controls(&self, area: Rect, buf: &mut Buffer) {
        let control_state = &self.state.panels.control;
        let ordered = control_state.center.ordered();

        let mut lines = Vec::new();
        let mut index = 0;
        for category in ControlCategory::ALL {
            let members: Vec<&SystemControl> = ordered
                .iter()
                .copied()
                .filter(|c| c.category == category)
                .collect();
            if members.is_empty() {
                continue;
            }
            lines.push(Line::from(Span::styled(
                format!("─── {} ", category.label()),
                Style::default()
                    .fg(self.theme.colors.accent_secondary)
                    .add_modifier(Modifier::BOLD),
            )));
            for control in members {
                lines.extend(self.control_line(control, index == control_state.selected_index));
                index += 1;
            }
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel("Controls", self.theme, true))
            .render(area, buf);
    }
}

impl<'a> Widget for ControlPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(5)])
            .split(columns[0]);

        self.render_status(left[0], buf);
        self.render_actions(left[1], buf);
        self.render_controls(columns[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_bar_scales_to_width() {
        assert_eq!(slider_bar(0, 10), "░░░░░░░░░░   0");
        assert_eq!(slider_bar(50, 10), "█████░░░░░  50");
        assert_eq!(slider_bar(100, 10), "██████████ 100");
    }
}
