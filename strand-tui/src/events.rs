//! Key handling for the strand TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppFlow, AppState};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event.
pub fn handle_event(state: &mut AppState, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(state, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(state: &mut AppState, key: KeyEvent) -> EventResult {
    // Global shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return EventResult::Quit;
    }

    match state.flow {
        AppFlow::MainMenu => handle_menu_key(state, key),
        AppFlow::Playing => handle_scene_key(state, key),
        AppFlow::Quit => EventResult::Quit,
    }
}

fn handle_menu_key(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Up => {
            state.menu_up();
            EventResult::NeedsRedraw
        }
        KeyCode::Down => {
            state.menu_down();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            state.menu_select();
            if state.flow == AppFlow::Quit {
                EventResult::Quit
            } else {
                EventResult::NeedsRedraw
            }
        }
        _ => EventResult::Continue,
    }
}

fn handle_scene_key(state: &mut AppState, key: KeyEvent) -> EventResult {
    // While the narrator text is still being revealed, ordinary input is
    // suppressed; Space asks for the immediate reveal.
    if state.narrator.is_revealing() {
        if key.code == KeyCode::Char(' ') {
            state.skip_reveal();
        }
        return EventResult::Continue;
    }

    match key.code {
        KeyCode::Esc => {
            state.flow = AppFlow::MainMenu;
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            state.confirm();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            state.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            state.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
