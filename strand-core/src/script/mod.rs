//! Script document handling.
//!
//! A script is plain text split into sections by `# <progress-id>`
//! headings. Within a section, directives are separated by blank lines:
//! ambience commands (`` `[Audio: waves.ogg]` ``), narrator text, and
//! player keyword commands (`` `(inspect compass)` `` or
//! `` `(rest) > rested` `` for a progress jump).

pub mod parse;
pub mod segment;

pub use parse::{parse_section, AmbienceCommand, NarratorResponse, ParsedSection, ResponseLine};
pub use segment::{active_section, segment};

/// Immutable raw text of one scene's script.
///
/// Loaded once when the scene is set up and never mutated afterwards; the
/// dialogue engine re-reads it on every progress change.
#[derive(Debug, Clone)]
pub struct ScriptDocument(String);

impl ScriptDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
