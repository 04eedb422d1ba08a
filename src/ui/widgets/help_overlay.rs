//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::ui::theme::Theme;

pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

const SECTIONS: [(&str, &[(&str, &str)]); 5] = [
    (
        "General",
        &[
            ("q", "Quit"),
            ("?", "Toggle help"),
            ("Tab", "Next view"),
            ("1-4", "Jump to view"),
        ],
    ),
    (
        "Digital Map",
        &[
            ("↑/↓", "Select site"),
            ("+/-", "Zoom in / out"),
            ("0", "Reset viewport"),
        ],
    ),
    (
        "Control Center",
        &[
            ("Enter", "Toggle control"),
            ("←/→", "Adjust slider"),
            ("r", "Restart simulation"),
            ("e", "Emergency stop"),
            ("z", "Reset system"),
        ],
    ),
    (
        "Analytics",
        &[("←/→", "Switch tab"), ("g", "Cycle 1h / 6h / 24h")],
    ),
    ("Dialogs", &[("y/n", "Confirm or cancel"), ("Esc", "Close")]),
];

impl<'a> Widget for HelpOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(" ◈ Twinview Help ", self.theme.styles.panel_title))
            .borders(Borders::ALL)
            .border_style(self.theme.styles.panel_border_focused)
            .style(Style::default().bg(self.theme.colors.bg_secondary));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut y = inner.y;

        for (section, bindings) in SECTIONS.iter() {
            if y >= inner.bottom() {
                break;
            }

            let header = Line::from(vec![Span::styled(
                format!("─── {} ", section),
                Style::default()
                    .fg(self.theme.colors.accent_primary)
                    .add_modifier(Modifier::BOLD),
            )]);
            buf.set_line(inner.x + 1, y, &header, inner.width.saturating_sub(2));
            y += 1;

            for (key, desc) in bindings.iter() {
                if y >= inner.bottom() {
                    break;
                }

                let line = Line::from(vec![
                    Span::styled(format!("  {:>8}  ", key), self.theme.styles.keybind_key),
                    Span::styled(*desc, self.theme.styles.keybind),
                ]);
                buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(2));
                y += 1;
            }

            y += 1;
        }

        if area.height > 0 && area.width > 25 {
            let footer = Span::styled(
                " Press Esc or ? to close ",
                Style::default().fg(self.theme.colors.fg_muted),
            );
            buf.set_span(area.x + (area.width - 25) / 2, area.bottom() - 1, &footer, 25);
        }
    }
}
