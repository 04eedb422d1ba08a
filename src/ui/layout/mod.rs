//! Layout management system

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout rects for the frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub body: Rect,
    pub footer: Rect,
    pub overlay_area: Rect,
}

pub struct LayoutManager;

impl LayoutManager {
    /// Split the frame into header, view tabs, body and footer
    pub fn compute(area: Rect) -> ComputedLayout {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(1), // View tabs
                Constraint::Min(10),   // Body
                Constraint::Length(1), // Footer
            ])
            .split(area);

        ComputedLayout {
            header: chunks[0],
            tabs: chunks[1],
            body: chunks[2],
            footer: chunks[3],
            overlay_area: centered_rect(60, 70, area),
        }
    }

    /// Body split: a main panel on the left and a details sidebar
    pub fn with_sidebar(body: Rect, sidebar_percent: u16) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - sidebar_percent.clamp(20, 50)),
                Constraint::Min(24),
            ])
            .split(body);
        (chunks[0], chunks[1])
    }
}

/// Create a centered rect with given percentage width/height
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rows_stack_without_gaps() {
        let layout = LayoutManager::compute(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header, Rect::new(0, 0, 100, 1));
        assert_eq!(layout.tabs, Rect::new(0, 1, 100, 1));
        assert_eq!(layout.body, Rect::new(0, 2, 100, 37));
        assert_eq!(layout.footer, Rect::new(0, 39, 100, 1));
    }

    #[test]
    fn overlay_is_inside_frame() {
        let area = Rect::new(0, 0, 120, 50);
        let overlay = LayoutManager::compute(area).overlay_area;
        assert!(overlay.width < area.width && overlay.height < area.height);
        assert_eq!(overlay.intersection(area), overlay);
    }
}
