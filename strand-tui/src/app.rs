//! Application state: flow, scenes, player input and effect routing.

use std::path::Path;

use tracing::error;

use strand_core::{
    Effect, RevealScheduler, SceneError, SceneId, SceneManager, DEFAULT_CHARS_PER_MINUTE,
};

use crate::audio::{AmbiencePlayer, LoggingAmbience};

/// Top-level application flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    MainMenu,
    Playing,
    Quit,
}

/// Entries of the main menu, in display order.
pub const MENU_ITEMS: [&str; 3] = ["Start", "Forest", "Quit"];

/// Main application state.
pub struct AppState {
    pub flow: AppFlow,
    pub scenes: SceneManager,

    /// The narrator box's reveal scheduler; its buffer is what gets drawn.
    pub narrator: RevealScheduler,
    pub reveal_rate: u32,

    /// The player's pending typed text (also what the player box shows).
    pub input_buffer: String,

    pub menu_index: usize,
    pub ambience: Box<dyn AmbiencePlayer>,

    /// Diagnostic from a fatal script error, printed after the terminal
    /// is restored.
    pub fatal: Option<String>,
}

impl AppState {
    pub fn new(assets_root: &Path) -> Result<Self, SceneError> {
        Ok(Self {
            flow: AppFlow::MainMenu,
            scenes: SceneManager::load(assets_root)?,
            narrator: RevealScheduler::new(),
            reveal_rate: DEFAULT_CHARS_PER_MINUTE,
            input_buffer: String::new(),
            menu_index: 0,
            ambience: Box::new(LoggingAmbience),
            fatal: None,
        })
    }

    /// Enter `id` and deliver its first narrator line.
    pub fn start_scene(&mut self, id: SceneId) {
        if let Err(e) = self.try_start_scene(id) {
            self.fail(e);
        }
    }

    fn try_start_scene(&mut self, id: SceneId) -> Result<(), SceneError> {
        self.scenes.enter(id)?;
        self.flow = AppFlow::Playing;
        self.input_buffer.clear();
        let effects = self.scenes.confirm("")?;
        self.route(effects);
        Ok(())
    }

    /// Handle a confirm (Enter) while playing. A running reveal
    /// serializes the reveal-then-confirm cycle: the confirm is dropped.
    pub fn confirm(&mut self) {
        if self.narrator.is_revealing() {
            return;
        }
        let typed = self.input_buffer.clone();
        match self.scenes.confirm(&typed) {
            Ok(effects) => self.route(effects),
            Err(e) => self.fail(e),
        }
    }

    fn route(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Narrate(text) => {
                    self.narrator.reveal_replace(text, self.reveal_rate);
                }
                Effect::Ambience { kind, argument } => {
                    self.ambience.play(&kind, &argument);
                }
                Effect::ClearPlayerText => self.input_buffer.clear(),
                Effect::Transition(id) => self.start_scene(id),
            }
        }
    }

    /// Fatal script errors terminate the app with a diagnostic naming the
    /// offending scene or progress id; there is no in-game recovery UI.
    fn fail(&mut self, e: SceneError) {
        error!(error = %e, "fatal scene error");
        self.fatal = Some(e.to_string());
        self.flow = AppFlow::Quit;
    }

    pub fn type_char(&mut self, c: char) {
        if !self.narrator.is_revealing() {
            self.input_buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn skip_reveal(&self) {
        self.narrator.skip();
    }

    /// Subtle help line under the boxes.
    pub fn hint(&self) -> &'static str {
        if self.scenes.active().engine().awaiting_keyword() {
            "Write a command and press Enter."
        } else {
            "Press Enter to continue."
        }
    }

    pub fn menu_up(&mut self) {
        self.menu_index = self.menu_index.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        self.menu_index = (self.menu_index + 1).min(MENU_ITEMS.len() - 1);
    }

    pub fn menu_select(&mut self) {
        match self.menu_index {
            0 => self.start_scene(SceneId::Beach),
            1 => self.start_scene(SceneId::Forest),
            _ => self.flow = AppFlow::Quit,
        }
    }
}
