//! Main render function for the strand TUI.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::layout::{centered_rect, SceneLayout};
use super::widgets::{MenuWidget, NarratorBox, PlayerBox};
use crate::app::{AppFlow, AppState, MENU_ITEMS};

/// Render the application.
pub fn render(frame: &mut Frame, state: &AppState) {
    match state.flow {
        AppFlow::MainMenu => render_menu(frame, state),
        AppFlow::Playing => render_scene(frame, state),
        AppFlow::Quit => {}
    }
}

fn render_menu(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let title = Paragraph::new(Line::from(Span::styled(
        "S T R A N D",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    let mut title_area = centered_rect(20, 1, area);
    title_area.y = title_area.y.saturating_sub(4);
    frame.render_widget(title, title_area);

    let menu_area = centered_rect(12, MENU_ITEMS.len() as u16, area);
    frame.render_widget(MenuWidget::new(&MENU_ITEMS, state.menu_index), menu_area);
}

fn render_scene(frame: &mut Frame, state: &AppState) {
    let layout = SceneLayout::calculate(frame.area());

    let scene = state.scenes.active();
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", scene.id()),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(title, layout.title_area);

    let narration = state.narrator.snapshot();
    let revealing = state.narrator.is_revealing();
    frame.render_widget(
        NarratorBox::new(&narration).revealing(revealing),
        layout.narrator_area,
    );

    let hint = if revealing {
        "Space: reveal at once."
    } else {
        state.hint()
    };
    let hint_line = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint_line, layout.hint_area);

    frame.render_widget(
        PlayerBox::new(&state.input_buffer).active(scene.engine().awaiting_keyword()),
        layout.player_area,
    );
}
