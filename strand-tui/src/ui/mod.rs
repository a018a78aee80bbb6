//! Terminal user interface for strand.
//!
//! Two stacked text boxes (narrator above, player below) with hint lines,
//! plus the main menu.

pub mod layout;
pub mod render;
pub mod widgets;

pub use render::render;
