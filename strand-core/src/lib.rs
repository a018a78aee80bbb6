//! Keyword-driven interactive fiction engine.
//!
//! This crate turns a plain-text scene script into navigable, branching
//! dialogue. It provides:
//! - Section segmentation and directive parsing for the script format
//! - A dialogue engine that drains narrator responses and matches
//!   player-typed keywords
//! - A `go`/`look` command dispatcher over per-scene map configuration
//! - A cancellable letter-by-letter reveal scheduler
//!
//! Rendering and audio stay outside: the engine emits [`Effect`] values
//! and the frontend decides how to show or play them.
//!
//! # Quick Start
//!
//! ```
//! use strand_core::{DialogueEngine, Effect, MapAtlas, MapConfig, ScriptDocument};
//!
//! let doc = ScriptDocument::new("# beginning\nHello.\n\nWorld.\n");
//! let mut engine = DialogueEngine::new();
//! engine.enter_scene(&doc, "beginning").unwrap();
//!
//! let effects = engine
//!     .confirm(&doc, "", &MapConfig::default(), &MapAtlas::new())
//!     .unwrap();
//! assert_eq!(effects, vec![Effect::Narrate("Hello.".to_string())]);
//! ```

pub mod command;
pub mod engine;
pub mod error;
pub mod reveal;
pub mod scene;
pub mod script;

// Primary public API
pub use command::{try_dispatch, Dispatch, MapAtlas, MapConfig};
pub use engine::{DialogueEngine, Effect, Mode, MAX_JUMP_DEPTH, START_PROGRESS};
pub use error::ScriptError;
pub use reveal::{RevealScheduler, DEFAULT_CHARS_PER_MINUTE};
pub use scene::{Scene, SceneError, SceneId, SceneManager};
pub use script::{AmbienceCommand, NarratorResponse, ParsedSection, ResponseLine, ScriptDocument};
