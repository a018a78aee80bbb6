//! Script error taxonomy.
//!
//! All of these indicate a content authoring defect or a script/code
//! mismatch. They are surfaced at scene-enter or jump time and are not
//! retried; unmatched player input is deliberately *not* an error.

use thiserror::Error;

/// Errors raised while segmenting or navigating a script document.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The document contains no `# ` section heading at all.
    #[error("script contains no `# ` section heading")]
    MalformedScript,

    /// Two section headings carry the same progress id, so a jump could
    /// not resolve to exactly one section.
    #[error("progress id '{0}' appears in more than one section heading")]
    DuplicateProgressId(String),

    /// The current progress id has no matching section.
    #[error("no script section matches progress id '{0}'")]
    UnknownProgressState(String),

    /// A chain of progress jumps exceeded the depth guard without
    /// reaching displayable content.
    #[error("progress jumps exceeded depth {depth} while resolving '{id}'")]
    JumpDepthExceeded { id: String, depth: usize },
}
