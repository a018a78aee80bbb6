//! The dialogue engine.
//!
//! Owns the current progress id, the response queue and the keyword
//! table for one scene. Confirmation events drain the queue front to
//! back; once it is empty, typed player input is matched against the
//! keyword table (after the command dispatcher has had first refusal).
//! Progress jumps rebuild queue and table from the target section and
//! drain its first response synchronously, so a jump is never visible
//! as an extra empty turn.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::command::{self, Dispatch, MapAtlas, MapConfig};
use crate::error::ScriptError;
use crate::scene::SceneId;
use crate::script::{active_section, parse_section, NarratorResponse, ResponseLine, ScriptDocument};

/// Conventional start id for a freshly entered scene.
pub const START_PROGRESS: &str = "beginning";

/// Bound on chained progress jumps. The script format cannot express a
/// queue-head jump today, but the guard keeps a future format change
/// from looping forever.
pub const MAX_JUMP_DEPTH: usize = 8;

/// What the frontend should do in response to one engine step, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Display a narrator line (via the reveal scheduler).
    Narrate(String),
    /// Play a named ambience cue.
    Ambience { kind: String, argument: String },
    /// Clear the player's typed text box.
    ClearPlayerText,
    /// Switch the active scene.
    Transition(SceneId),
}

/// Whether the engine is mid-delivery or waiting for keyword input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Reacting,
}

/// Dialogue state for one scene. Scene-local; never shared across scenes.
#[derive(Debug, Default)]
pub struct DialogueEngine {
    progress: String,
    queue: VecDeque<NarratorResponse>,
    table: HashMap<String, Vec<NarratorResponse>>,
    mode: Mode,
}

impl DialogueEngine {
    pub fn new() -> Self {
        Self {
            progress: START_PROGRESS.to_string(),
            ..Self::default()
        }
    }

    /// The authoritative cursor into the script document.
    pub fn progress(&self) -> &str {
        &self.progress
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True once the queue is drained and keyword input is what advances
    /// the dialogue. Drives the frontend's hint text.
    pub fn awaiting_keyword(&self) -> bool {
        self.queue.is_empty() && !self.table.is_empty()
    }

    /// Point the engine at `progress` within `document`.
    ///
    /// Queue and table are swapped in only after the section resolves and
    /// parses, so a failure never leaves them half-updated.
    pub fn enter_scene(
        &mut self,
        document: &ScriptDocument,
        progress: &str,
    ) -> Result<(), ScriptError> {
        let body = active_section(document.as_str(), progress)?;
        let parsed = parse_section(&body);
        debug!(
            %progress,
            queued = parsed.queue.len(),
            keywords = parsed.table.len(),
            "entered script section"
        );
        self.progress = progress.to_string();
        self.queue = parsed.queue;
        self.table = parsed.table;
        self.update_mode();
        Ok(())
    }

    /// Handle one confirmation event.
    ///
    /// With responses queued, delivers the head (ambience first, then the
    /// narrator line). With an empty queue, consumes the pending typed
    /// input and dispatches it. With queue *and* table empty the section
    /// is exhausted and re-entered, restarting its delivery.
    pub fn confirm(
        &mut self,
        document: &ScriptDocument,
        typed: &str,
        map: &MapConfig,
        atlas: &MapAtlas,
    ) -> Result<Vec<Effect>, ScriptError> {
        let mut effects = Vec::new();

        if self.queue.is_empty() && self.table.is_empty() {
            let progress = self.progress.clone();
            self.enter_scene(document, &progress)?;
        }

        if let Some(head) = self.queue.pop_front() {
            self.deliver(head, document, &mut effects, 0)?;
        } else {
            effects.push(Effect::ClearPlayerText);
            self.dispatch_input(typed, document, map, atlas, &mut effects)?;
        }

        self.update_mode();
        Ok(effects)
    }

    /// Match free-form player input: command dispatcher first, then the
    /// keyword table. Unmatched input is a silent no-op, not an error.
    fn dispatch_input(
        &mut self,
        input: &str,
        document: &ScriptDocument,
        map: &MapConfig,
        atlas: &MapAtlas,
        effects: &mut Vec<Effect>,
    ) -> Result<(), ScriptError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        let fallback = match command::try_dispatch(input, map, atlas) {
            Dispatch::Handled(mut handled) => {
                effects.append(&mut handled);
                return Ok(());
            }
            Dispatch::Fallback(rejection) => Some(rejection),
            Dispatch::NotCommand => None,
        };

        let keyword = input.to_lowercase();
        let matched = self.table.get(&keyword).and_then(|responses| responses.first());
        let Some(first) = matched.cloned() else {
            if let Some(mut rejection) = fallback {
                effects.append(&mut rejection);
            } else {
                debug!(%keyword, "no keyword match, input ignored");
            }
            return Ok(());
        };

        self.deliver(first, document, effects, 0)
    }

    /// Emit one response: ambience cues, then either the narrator line or
    /// a progress jump.
    fn deliver(
        &mut self,
        response: NarratorResponse,
        document: &ScriptDocument,
        effects: &mut Vec<Effect>,
        depth: usize,
    ) -> Result<(), ScriptError> {
        for cue in response.ambience {
            effects.push(Effect::Ambience {
                kind: cue.kind,
                argument: cue.argument,
            });
        }
        match response.line {
            ResponseLine::Text(text) => {
                effects.push(Effect::Narrate(text));
                Ok(())
            }
            ResponseLine::Jump(target) => self.execute_jump(&target, document, effects, depth + 1),
        }
    }

    /// Set progress to `target`, rebuild queue and table from its section
    /// and drain the new queue head without waiting for another confirm.
    fn execute_jump(
        &mut self,
        target: &str,
        document: &ScriptDocument,
        effects: &mut Vec<Effect>,
        depth: usize,
    ) -> Result<(), ScriptError> {
        if depth > MAX_JUMP_DEPTH {
            return Err(ScriptError::JumpDepthExceeded {
                id: target.to_string(),
                depth: MAX_JUMP_DEPTH,
            });
        }
        debug!(from = %self.progress, to = %target, "progress jump");
        self.enter_scene(document, target)?;
        match self.queue.pop_front() {
            Some(head) => self.deliver(head, document, effects, depth),
            None => Ok(()),
        }
    }

    fn update_mode(&mut self) {
        self.mode = if self.queue.is_empty() {
            Mode::Idle
        } else {
            Mode::Reacting
        };
    }
}
