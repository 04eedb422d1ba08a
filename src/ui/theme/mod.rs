//! Theme system with color palettes

use ratatui::style::{Color, Modifier, Style};

use crate::sim::{AssetStatus, HistoryMetric, Severity};

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub styles: ThemeStyles,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Base colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Special
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

#[derive(Debug, Clone)]
pub struct ThemeStyles {
    pub header: Style,
    pub footer: Style,
    pub panel_title: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub list_item: Style,
    pub list_item_selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub status_online: Style,
    pub status_offline: Style,
    pub status_maintenance: Style,
    pub gauge_track: Style,
    pub label: Style,
    pub value: Style,
    pub keybind: Style,
    pub keybind_key: Style,
    pub notification_info: Style,
    pub notification_success: Style,
    pub notification_error: Style,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            "tokyo-night" | "tokyonight" => Self::tokyo_night(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using tokyo-night");
                Self::tokyo_night()
            }
        }
    }

    /// Tokyo Night theme (default)
    pub fn tokyo_night() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(26, 27, 38),
            bg_secondary: Color::Rgb(36, 40, 59),
            bg_tertiary: Color::Rgb(41, 46, 66),

            fg_primary: Color::Rgb(192, 202, 245),
            fg_secondary: Color::Rgb(169, 177, 214),
            fg_muted: Color::Rgb(86, 95, 137),

            accent_primary: Color::Rgb(122, 162, 247),
            accent_secondary: Color::Rgb(187, 154, 247),

            success: Color::Rgb(158, 206, 106),
            warning: Color::Rgb(224, 175, 104),
            error: Color::Rgb(247, 118, 142),
            info: Color::Rgb(125, 207, 255),

            border: Color::Rgb(41, 46, 66),
            border_focused: Color::Rgb(122, 162, 247),
            selection: Color::Rgb(52, 59, 88),
        };

        Self::from_colors("Tokyo Night", colors)
    }

    /// Nord theme
    pub fn nord() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(46, 52, 64),
            bg_secondary: Color::Rgb(59, 66, 82),
            bg_tertiary: Color::Rgb(67, 76, 94),

            fg_primary: Color::Rgb(236, 239, 244),
            fg_secondary: Color::Rgb(229, 233, 240),
            fg_muted: Color::Rgb(216, 222, 233),

            accent_primary: Color::Rgb(136, 192, 208),
            accent_secondary: Color::Rgb(129, 161, 193),

            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            info: Color::Rgb(136, 192, 208),

            border: Color::Rgb(67, 76, 94),
            border_focused: Color::Rgb(136, 192, 208),
            selection: Color::Rgb(76, 86, 106),
        };

        Self::from_colors("Nord", colors)
    }

    /// Gruvbox theme
    pub fn gruvbox() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(40, 40, 40),
            bg_secondary: Color::Rgb(60, 56, 54),
            bg_tertiary: Color::Rgb(80, 73, 69),

            fg_primary: Color::Rgb(235, 219, 178),
            fg_secondary: Color::Rgb(213, 196, 161),
            fg_muted: Color::Rgb(168, 153, 132),

            accent_primary: Color::Rgb(131, 165, 152),
            accent_secondary: Color::Rgb(211, 134, 155),

            success: Color::Rgb(184, 187, 38),
            warning: Color::Rgb(250, 189, 47),
            error: Color::Rgb(251, 73, 52),
            info: Color::Rgb(131, 165, 152),

            border: Color::Rgb(80, 73, 69),
            border_focused: Color::Rgb(131, 165, 152),
            selection: Color::Rgb(102, 92, 84),
        };

        Self::from_colors("Gruvbox", colors)
    }

    fn from_colors(name: &str, colors: ThemeColors) -> Self {
        let styles = ThemeStyles {
            header: Style::default()
                .bg(colors.bg_secondary)
                .fg(colors.fg_primary),
            footer: Style::default().bg(colors.bg_secondary).fg(colors.fg_muted),
            panel_title: Style::default()
                .fg(colors.accent_primary)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(colors.border),
            panel_border_focused: Style::default().fg(colors.border_focused),
            list_item: Style::default().fg(colors.fg_primary),
            list_item_selected: Style::default()
                .fg(colors.fg_primary)
                .bg(colors.selection)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(colors.accent_primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(colors.fg_muted),
            status_online: Style::default().fg(colors.success),
            status_offline: Style::default().fg(colors.error),
            status_maintenance: Style::default().fg(colors.warning),
            gauge_track: Style::default().bg(colors.bg_tertiary),
            label: Style::default().fg(colors.fg_muted),
            value: Style::default()
                .fg(colors.fg_primary)
                .add_modifier(Modifier::BOLD),
            keybind: Style::default().fg(colors.fg_muted),
            keybind_key: Style::default()
                .fg(colors.accent_secondary)
                .add_modifier(Modifier::BOLD),
            notification_info: Style::default().fg(colors.info),
            notification_success: Style::default().fg(colors.success),
            notification_error: Style::default().fg(colors.error),
        };

        Self {
            name: name.to_string(),
            colors,
            styles,
        }
    }

    pub fn asset_status(&self, status: AssetStatus) -> Style {
        match status {
            AssetStatus::Online => self.styles.status_online,
            AssetStatus::Offline => self.styles.status_offline,
            AssetStatus::Maintenance => self.styles.status_maintenance,
        }
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Normal => self.colors.success,
            Severity::Warning => self.colors.warning,
            Severity::Critical => self.colors.error,
        }
    }

    pub fn series(&self, metric: HistoryMetric) -> Color {
        match metric {
            HistoryMetric::Cpu => self.colors.accent_primary,
            HistoryMetric::Memory => self.colors.accent_secondary,
            HistoryMetric::Temperature => self.colors.warning,
            HistoryMetric::Power => self.colors.info,
            HistoryMetric::Efficiency => self.colors.success,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(Theme::from_name("Nord").name, "Nord");
        assert_eq!(Theme::from_name("gruvbox").name, "Gruvbox");
        assert_eq!(Theme::from_name("tokyo-night").name, "Tokyo Night");
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(Theme::from_name("solarized").name, Theme::default().name);
    }

    #[test]
    fn severity_colors_follow_semantics() {
        let theme = Theme::default();
        assert_eq!(theme.severity(Severity::Critical), theme.colors.error);
        assert_eq!(theme.severity(Severity::Normal), theme.colors.success);
    }
}
