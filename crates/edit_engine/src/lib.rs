//! Edit Engine - Drop orchestration, editor session and undo/redo
//!
//! This crate wires the layout engine into a host-facing API: one call per
//! pointer hover or drop, a session object that owns the current canvas and
//! its history, and the settings that tune drop zones.

mod error;
mod settings;
mod canvas_state;
mod history;
mod editor;

pub use error::*;
pub use settings::*;
pub use canvas_state::*;
pub use history::*;
pub use editor::*;
