//! Layout calculations for the strand TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The in-scene layout areas.
pub struct SceneLayout {
    pub title_area: Rect,
    pub narrator_area: Rect,
    pub hint_area: Rect,
    pub player_area: Rect,
}

impl SceneLayout {
    /// Calculate layout based on terminal size.
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Title bar
                Constraint::Min(6),     // Narrator box
                Constraint::Length(1),  // Hint line
                Constraint::Length(5),  // Player box
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            narrator_area: chunks[1],
            hint_area: chunks[2],
            player_area: chunks[3],
        }
    }
}

/// A centered rectangle for the main menu.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
