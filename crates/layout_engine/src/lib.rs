//! Layout Engine - Drop intent classification and canvas arrangement rules
//!
//! This crate turns a pointer position over a canvas element into a symbolic
//! drop [`Intent`], resolves drag payloads into [`Source`]s, and applies the
//! row/column arrangement rules that keep the form tree canonical.

mod error;
mod geometry;
mod source;
mod engine;
mod dissolve;

pub use error::*;
pub use geometry::*;
pub use source::*;
pub use engine::*;
pub use dissolve::*;
